//! Character sets outside the `allow-charset` list.

use schemalint_catalog::Schema;
use schemalint_core::{Annotation, LogicalSchema, Options};

use crate::problem::Problem;

const SUMMARY: &str = "Character set not permitted";

/// Flags table defaults and columns using a character set that is not in
/// `allow-charset`.
///
/// Column findings point at the line defining the column. Columns sharing a
/// flagged table default are not reported separately.
pub struct BadCharSetProblem;

impl Problem for BadCharSetProblem {
    fn name(&self) -> &'static str {
        "bad-charset"
    }

    fn description(&self) -> &str {
        "Detects character sets not listed in allow-charset"
    }

    fn check<'a>(&self, schema: &Schema, logical: &'a LogicalSchema, opts: &Options) -> Vec<Annotation<'a>> {
        let allowed = opts.allowed_char_sets.join(", ");
        let mut annotations = Vec::new();

        for table in &schema.tables {
            let Some(statement) = logical.create_for(&table.object_key()) else {
                continue;
            };

            let default_flagged = !opts.is_char_set_allowed(&table.char_set);
            if default_flagged {
                annotations.push(Annotation::new(
                    statement,
                    SUMMARY,
                    format!(
                        "Table `{}` has default character set {}, which is not listed in option allow-charset ({})",
                        table.name, table.char_set, allowed
                    ),
                ));
            }

            for column in &table.columns {
                let Some(char_set) = column.char_set.as_deref() else {
                    continue;
                };
                // Inheriting a flagged table default is already reported once
                if opts.is_char_set_allowed(char_set)
                    || (default_flagged && char_set.eq_ignore_ascii_case(&table.char_set))
                {
                    continue;
                }
                let line_offset = statement
                    .find_line_offset(&format!("`{}`", column.name))
                    .unwrap_or(0);
                annotations.push(
                    Annotation::new(
                        statement,
                        SUMMARY,
                        format!(
                            "Column `{}` of table `{}` uses character set {}, which is not listed in option allow-charset ({})",
                            column.name, table.name, char_set, allowed
                        ),
                    )
                    .with_line_offset(line_offset as isize),
                );
            }
        }

        annotations
    }
}
