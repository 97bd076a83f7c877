use colswap_core::Schema;
use colswap_plan::{
    ColumnRef, ConfigError, GroupConfig, GroupSpec, PermutationPolicy, RandomizationUnit,
    SwapConfig, build,
};
use serde_json::json;

fn customer_schema() -> Schema {
    Schema::new(["id", "email", "phone", "city", "zip", "segment"]).expect("schema")
}

fn group(columns: &[&str]) -> GroupConfig {
    GroupConfig::Columns(columns.iter().map(|name| ColumnRef::from(*name)).collect())
}

fn error_codes(err: &ConfigError) -> Vec<String> {
    err.report()
        .expect("validation report")
        .errors
        .iter()
        .map(|issue| issue.code.clone())
        .collect()
}

#[test]
fn build_resolves_columns_to_positions() {
    let config = SwapConfig {
        seed: Some(json!(42)),
        groups: vec![group(&["email", "phone"]), group(&["zip", "city"])],
        ..SwapConfig::default()
    };

    let plan = build(&config, &customer_schema()).expect("plan builds");

    assert_eq!(plan.seed(), Some(42));
    assert_eq!(plan.groups().len(), 2);
    assert_eq!(plan.groups()[0].name(), "group_0");
    assert_eq!(plan.groups()[0].columns(), &[1, 2]);
    assert_eq!(plan.groups()[1].columns(), &[4, 3]);
    assert_eq!(plan.groups()[1].column_names(), &["zip", "city"]);
    assert_eq!(plan.groups()[0].unit(), RandomizationUnit::PerRow);
    assert_eq!(plan.groups()[0].policy(), PermutationPolicy::Any);
    assert!(plan.warnings().is_empty());
}

#[test]
fn build_accepts_positional_references() {
    let config = SwapConfig {
        seed: Some(json!("7")),
        groups: vec![GroupConfig::Columns(vec![
            ColumnRef::Index(3),
            ColumnRef::from("zip"),
        ])],
        ..SwapConfig::default()
    };

    let plan = build(&config, &customer_schema()).expect("plan builds");
    assert_eq!(plan.seed(), Some(7));
    assert_eq!(plan.groups()[0].column_names(), &["city", "zip"]);
}

#[test]
fn build_rejects_unknown_column() {
    let config = SwapConfig {
        groups: vec![group(&["email", "fax"])],
        ..SwapConfig::default()
    };

    let err = build(&config, &customer_schema()).expect_err("unknown column");
    assert_eq!(error_codes(&err), vec!["unknown_column"]);
    let issue = &err.report().expect("report").errors[0];
    assert_eq!(issue.path, "/groups/0/1");
}

#[test]
fn build_rejects_out_of_range_position() {
    let config = SwapConfig {
        groups: vec![GroupConfig::Columns(vec![
            ColumnRef::Index(0),
            ColumnRef::Index(6),
        ])],
        ..SwapConfig::default()
    };

    let err = build(&config, &customer_schema()).expect_err("position out of range");
    assert_eq!(error_codes(&err), vec!["unknown_column"]);
}

#[test]
fn build_rejects_single_column_group() {
    let config = SwapConfig {
        groups: vec![GroupConfig::Spec(GroupSpec {
            name: Some("lonely".to_string()),
            columns: vec![ColumnRef::from("email")],
            ..GroupSpec::default()
        })],
        ..SwapConfig::default()
    };

    let err = build(&config, &customer_schema()).expect_err("group too small");
    assert_eq!(error_codes(&err), vec!["group_too_small"]);
    assert_eq!(err.report().expect("report").errors[0].path, "/groups/0/columns");
}

#[test]
fn build_rejects_overlapping_groups() {
    let config = SwapConfig {
        seed: Some(json!(1)),
        groups: vec![group(&["email", "phone"]), group(&["phone", "city"])],
        ..SwapConfig::default()
    };

    let err = build(&config, &customer_schema()).expect_err("overlap");
    assert_eq!(error_codes(&err), vec!["overlapping_groups"]);
    assert!(err.to_string().contains("already claimed by group 'group_0'"));
}

#[test]
fn build_rejects_column_repeated_within_group() {
    let config = SwapConfig {
        groups: vec![group(&["email", "email", "phone"])],
        ..SwapConfig::default()
    };

    let err = build(&config, &customer_schema()).expect_err("duplicate column");
    assert_eq!(error_codes(&err), vec!["duplicate_column"]);
}

#[test]
fn build_rejects_invalid_seeds() {
    for seed in [json!(-1), json!(1.5), json!("abc"), json!(true)] {
        let config = SwapConfig {
            seed: Some(seed.clone()),
            groups: vec![group(&["email", "phone"])],
            ..SwapConfig::default()
        };
        let err = build(&config, &customer_schema()).expect_err("invalid seed");
        assert_eq!(error_codes(&err), vec!["invalid_seed"], "seed {seed}");
    }
}

#[test]
fn build_collects_every_issue() {
    let config = SwapConfig {
        seed: Some(json!("x")),
        groups: vec![
            group(&["email", "phone"]),
            group(&["phone"]),
            group(&["nope", "city"]),
        ],
        ..SwapConfig::default()
    };

    let err = build(&config, &customer_schema()).expect_err("many issues");
    let codes = error_codes(&err);
    assert!(codes.contains(&"invalid_seed".to_string()));
    assert!(codes.contains(&"group_too_small".to_string()));
    assert!(codes.contains(&"overlapping_groups".to_string()));
    assert!(codes.contains(&"unknown_column".to_string()));
}

#[test]
fn build_rejects_duplicate_group_names() {
    let named = |name: &str, columns: &[&str]| {
        GroupConfig::Spec(GroupSpec {
            name: Some(name.to_string()),
            columns: columns.iter().map(|c| ColumnRef::from(*c)).collect(),
            ..GroupSpec::default()
        })
    };
    let config = SwapConfig {
        groups: vec![named("pii", &["email", "phone"]), named("pii", &["city", "zip"])],
        ..SwapConfig::default()
    };

    let err = build(&config, &customer_schema()).expect_err("duplicate name");
    assert_eq!(error_codes(&err), vec!["duplicate_group_name"]);
}

#[test]
fn build_applies_group_overrides() {
    let config = SwapConfig {
        seed: Some(json!(3)),
        force_swap: true,
        groups: vec![
            group(&["email", "phone"]),
            GroupConfig::Spec(GroupSpec {
                name: Some("geo".to_string()),
                columns: vec![ColumnRef::from("city"), ColumnRef::from("zip")],
                unit: Some(RandomizationUnit::PerColumn),
                force_swap: Some(false),
                derangement: None,
            }),
            GroupConfig::Spec(GroupSpec {
                name: Some("rest".to_string()),
                columns: vec![ColumnRef::from("id"), ColumnRef::from("segment")],
                derangement: Some(true),
                ..GroupSpec::default()
            }),
        ],
        ..SwapConfig::default()
    };

    let plan = build(&config, &customer_schema()).expect("plan builds");
    let groups = plan.groups();
    assert_eq!(groups[0].policy(), PermutationPolicy::NonIdentity);
    assert_eq!(groups[1].policy(), PermutationPolicy::Any);
    assert_eq!(groups[1].unit(), RandomizationUnit::PerColumn);
    assert_eq!(groups[2].policy(), PermutationPolicy::Derangement);
}

#[test]
fn build_warns_without_seed_or_groups() {
    let plan = build(&SwapConfig::default(), &customer_schema()).expect("empty plan builds");

    let codes: Vec<&str> = plan
        .warnings()
        .iter()
        .map(|issue| issue.code.as_str())
        .collect();
    assert_eq!(codes, vec!["no_groups", "seed_not_set"]);
    assert!(plan.groups().is_empty());
}
