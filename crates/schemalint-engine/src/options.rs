//! Translation of directory configuration into linter options

use schemalint_core::{ConfigError, Dir, Options, Severity};

use crate::problem::ProblemRegistry;

/// Build [`Options`] from the configuration of `dir`
///
/// `warnings` is applied before `errors`, so a problem listed in both ends
/// up as an error. Any name not in `registry` fails with a [`ConfigError`]
/// listing every valid name.
pub fn options_for_dir(dir: &Dir, registry: &ProblemRegistry) -> Result<Options, ConfigError> {
    let mut opts = Options {
        allowed_char_sets: dir.config.get_slice("allow-charset", ',', true),
        allowed_engines: dir.config.get_slice("allow-engine", ',', true),
        ..Options::default()
    };

    for (option, severity) in [("warnings", Severity::Warning), ("errors", Severity::Error)] {
        for name in dir.config.get_slice(option, ',', true) {
            let name = name.to_lowercase();
            if !registry.contains(&name) {
                return Err(ConfigError::new(format!(
                    "Option {} must be a comma-separated list including these values: {}",
                    option,
                    registry.names().join(", ")
                )));
            }
            opts.problem_severity.insert(name, severity);
        }
    }

    Ok(opts)
}
