use std::collections::BTreeMap;

use colswap_core::Row;
use colswap_plan::{RandomizationUnit, SwapGroup};
use rand::Rng;

use crate::model::GroupReport;
use crate::permutation::{Permutation, draw_permutation};

/// Applies one swap group to rows.
#[derive(Debug, Clone, Copy)]
pub struct RowSwapEngine<'a> {
    group: &'a SwapGroup,
}

impl<'a> RowSwapEngine<'a> {
    pub fn new(group: &'a SwapGroup) -> Self {
        Self { group }
    }

    pub fn group(&self) -> &'a SwapGroup {
        self.group
    }

    /// Draw one permutation under the group's policy.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Permutation {
        draw_permutation(self.group.len(), self.group.policy(), rng)
    }

    /// Write the permuted group cells of `source` into `target`.
    ///
    /// Only the group's columns of `target` are touched; both rows must
    /// match the schema the plan was built against.
    pub fn apply(&self, permutation: &Permutation, source: &Row, target: &mut Row) -> u64 {
        permutation.apply(self.group.columns(), source, target);
        self.group
            .columns()
            .iter()
            .filter(|&&column| target[column] != source[column])
            .count() as u64
    }

    /// Swap the group across all rows, reading `source` and writing `target`.
    ///
    /// Per-row groups draw one permutation per row in row order; per-column
    /// groups draw a single permutation up front, even when there are no rows.
    pub fn swap_rows<R: Rng + ?Sized>(
        &self,
        source: &[Row],
        target: &mut [Row],
        rng: &mut R,
    ) -> GroupReport {
        let mut report = GroupReport {
            name: self.group.name().to_string(),
            columns: self.group.column_names().to_vec(),
            unit: self.group.unit(),
            policy: self.group.policy(),
            rows_permuted: 0,
            rows_unchanged: 0,
            cells_changed: 0,
            assignment: None,
        };

        let fixed = match self.group.unit() {
            RandomizationUnit::PerRow => None,
            RandomizationUnit::PerColumn => {
                let permutation = self.draw(rng);
                report.assignment = Some(self.assignment(&permutation));
                Some(permutation)
            }
        };

        for (source_row, target_row) in source.iter().zip(target.iter_mut()) {
            let drawn;
            let permutation = match &fixed {
                Some(permutation) => permutation,
                None => {
                    drawn = self.draw(rng);
                    &drawn
                }
            };
            if permutation.is_identity() {
                report.rows_unchanged += 1;
                continue;
            }
            report.cells_changed += self.apply(permutation, source_row, target_row);
            report.rows_permuted += 1;
        }

        report
    }

    fn assignment(&self, permutation: &Permutation) -> BTreeMap<String, String> {
        let names = self.group.column_names();
        permutation
            .sources()
            .iter()
            .enumerate()
            .map(|(slot, &source)| (names[slot].clone(), names[source].clone()))
            .collect()
    }
}
