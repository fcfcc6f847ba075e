//! Template parameter model
//!
//! Turns repeated `key=value` arguments into the map sent as template
//! parameters. Entries are split on the first `=`, so values may contain `=`.

use std::collections::HashMap;

/// Normalized template parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    /// Accepted key/value pairs; later duplicates win
    pub values: HashMap<String, String>,
    /// Raw entries without a `=`, in input order
    pub rejected: Vec<String>,
}

/// Parse raw `key=value` entries
///
/// Entries without `=` are not an error; they are returned in
/// [`Parameters::rejected`] so the caller can warn about them.
pub fn parse_parameters<I, S>(raw: I) -> Parameters
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parameters = Parameters::default();

    for entry in raw {
        let entry = entry.as_ref();
        match entry.split_once('=') {
            Some((key, value)) => {
                parameters
                    .values
                    .insert(key.to_string(), value.to_string());
            }
            None => parameters.rejected.push(entry.to_string()),
        }
    }

    parameters
}
