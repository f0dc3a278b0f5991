//! Panel naming.

use clim_common::VariableMetadata;
use std::collections::{HashMap, HashSet};

/// Display name of a variable: long name (or short name when the long name
/// is blank), plus `@<level>` when a level is set, with each whitespace
/// character replaced by `_`. `None` when both names are blank.
pub fn variable_label(meta: &VariableMetadata) -> Option<String> {
    let base = [meta.long_name.as_deref(), Some(meta.name.as_str())]
        .into_iter()
        .flatten()
        .find(|n| !n.trim().is_empty())?;
    let label = match meta.level {
        Some(level) => format!("{}@{}", base, level),
        None => base.to_string(),
    };
    Some(sanitize(&label))
}

fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Make names unique, keeping first occurrences as they are and suffixing
/// later repeats with `.1`, `.2`, ...
pub fn make_unique(names: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        if taken.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let counter = counters.entry(name.clone()).or_insert(0);
        let unique = loop {
            *counter += 1;
            let candidate = format!("{}.{}", name, counter);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(unique.clone());
        out.push(unique);
    }

    out
}

/// Names for `panel_count` panels.
///
/// Multigrid panels are named after their variable metadata, falling back to
/// `Variable_<k>` when metadata is missing or blank. Other grids get
/// `Member_<k>`.
pub fn panel_names(
    variables: &[VariableMetadata],
    is_multigrid: bool,
    panel_count: usize,
) -> Vec<String> {
    if !is_multigrid {
        return (1..=panel_count).map(|k| format!("Member_{}", k)).collect();
    }

    let names = (0..panel_count)
        .map(|i| {
            variables
                .get(i)
                .and_then(variable_label)
                .unwrap_or_else(|| format!("Variable_{}", i + 1))
        })
        .collect();
    make_unique(names)
}
