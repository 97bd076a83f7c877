use colswap_core::{Schema, Value};
use colswap_engine::{Permutation, RowSwapEngine, draw_permutation};
use colswap_plan::{
    ColumnRef, GroupConfig, GroupSpec, PermutationPolicy, RandomizationUnit, SwapConfig, SwapPlan,
    build,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

fn plan_for(columns: &[&str], group: &[&str], unit: RandomizationUnit) -> SwapPlan {
    let schema = Schema::new(columns.iter().copied()).expect("schema");
    let config = SwapConfig {
        seed: Some(json!(1)),
        groups: vec![GroupConfig::Spec(GroupSpec {
            columns: group.iter().map(|name| ColumnRef::from(*name)).collect(),
            unit: Some(unit),
            ..GroupSpec::default()
        })],
        ..SwapConfig::default()
    };
    build(&config, &schema).expect("plan")
}

fn sorted_cells(row: &[Value], columns: &[usize]) -> Vec<String> {
    let mut cells: Vec<String> = columns.iter().map(|&c| format!("{:?}", row[c])).collect();
    cells.sort();
    cells
}

#[test]
fn explicit_assignments_swap_then_keep() {
    let plan = plan_for(&["a", "b"], &["a", "b"], RandomizationUnit::PerRow);
    let engine = RowSwapEngine::new(&plan.groups()[0]);

    let source = vec![
        vec![Value::Int(1), Value::Int(2)],
        vec![Value::Int(3), Value::Int(4)],
    ];
    let mut target = source.clone();

    let swap = Permutation::from_sources(vec![1, 0]).expect("swap");
    let keep = Permutation::identity(2);
    engine.apply(&swap, &source[0], &mut target[0]);
    engine.apply(&keep, &source[1], &mut target[1]);

    assert_eq!(
        target,
        vec![
            vec![Value::Int(2), Value::Int(1)],
            vec![Value::Int(3), Value::Int(4)],
        ]
    );
}

#[test]
fn apply_only_touches_group_columns() {
    let plan = plan_for(&["id", "x", "y", "z"], &["x", "z", "y"], RandomizationUnit::PerRow);
    let engine = RowSwapEngine::new(&plan.groups()[0]);

    let source = vec![
        Value::Int(9),
        Value::from("x"),
        Value::from("y"),
        Value::Null,
    ];
    let mut target = source.clone();
    let rotate = Permutation::from_sources(vec![1, 2, 0]).expect("rotation");

    let changed = engine.apply(&rotate, &source, &mut target);

    assert_eq!(target[0], Value::Int(9));
    assert_eq!(target[1], Value::Null);
    assert_eq!(target[3], Value::from("y"));
    assert_eq!(target[2], Value::from("x"));
    assert_eq!(changed, 3);
}

#[test]
fn per_row_swaps_conserve_group_values() {
    let plan = plan_for(
        &["a", "b", "c", "d"],
        &["a", "b", "c"],
        RandomizationUnit::PerRow,
    );
    let group = &plan.groups()[0];
    let engine = RowSwapEngine::new(group);

    let source: Vec<Vec<Value>> = (0..200)
        .map(|i| {
            vec![
                Value::Int(i),
                Value::from(format!("t{i}")),
                if i % 3 == 0 { Value::Null } else { Value::Float(i as f64 / 2.0) },
                Value::Bool(i % 2 == 0),
            ]
        })
        .collect();
    let mut target = source.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    let report = engine.swap_rows(&source, &mut target, &mut rng);

    for (before, after) in source.iter().zip(&target) {
        assert_eq!(
            sorted_cells(before, group.columns()),
            sorted_cells(after, group.columns())
        );
        assert_eq!(before[3], after[3]);
    }
    assert_eq!(report.rows_permuted + report.rows_unchanged, 200);
    assert!(report.rows_permuted > 100, "most rows should be permuted");
    assert!(report.assignment.is_none());
}

#[test]
fn per_column_applies_one_assignment_to_every_row() {
    let plan = plan_for(&["a", "b", "c"], &["a", "b", "c"], RandomizationUnit::PerColumn);
    let engine = RowSwapEngine::new(&plan.groups()[0]);

    let source: Vec<Vec<Value>> = (0..50)
        .map(|i| vec![Value::Int(i), Value::Int(100 + i), Value::Int(200 + i)])
        .collect();

    for seed in 0..20 {
        let mut target = source.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let report = engine.swap_rows(&source, &mut target, &mut rng);

        let assignment = report.assignment.expect("per-column assignment");
        let offsets: Vec<i64> = target[0]
            .iter()
            .map(|value| value.as_i64().expect("int") / 100)
            .collect();
        for (i, row) in target.iter().enumerate() {
            let row_offsets: Vec<i64> = row
                .iter()
                .map(|value| (value.as_i64().expect("int") - i as i64) / 100)
                .collect();
            assert_eq!(row_offsets, offsets);
        }
        assert_eq!(assignment.len(), 3);
        assert!(report.rows_permuted == 50 || report.rows_unchanged == 50);
    }
}

#[test]
fn force_swap_never_draws_identity_for_pairs() {
    for seed in 0..500 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..20 {
            let permutation = draw_permutation(2, PermutationPolicy::NonIdentity, &mut rng);
            assert_eq!(permutation.sources(), &[1, 0]);
        }
    }
}

#[test]
fn force_swap_allows_fixed_points_but_not_identity() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut saw_fixed_point = false;
    for _ in 0..1000 {
        let permutation = draw_permutation(4, PermutationPolicy::NonIdentity, &mut rng);
        assert!(!permutation.is_identity());
        saw_fixed_point |= permutation.has_fixed_point();
    }
    assert!(saw_fixed_point);
}

#[test]
fn derangement_moves_every_column() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    for len in 2..7 {
        for _ in 0..300 {
            let permutation = draw_permutation(len, PermutationPolicy::Derangement, &mut rng);
            assert!(!permutation.has_fixed_point(), "len {len}: {permutation:?}");
        }
    }
}

#[test]
fn per_column_draws_even_without_rows() {
    let plan = plan_for(&["a", "b"], &["a", "b"], RandomizationUnit::PerColumn);
    let engine = RowSwapEngine::new(&plan.groups()[0]);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let report = engine.swap_rows(&[], &mut [], &mut rng);

    assert!(report.assignment.is_some());
    assert_eq!(report.rows_permuted + report.rows_unchanged, 0);
}
