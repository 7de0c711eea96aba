//! The group color file: one `NAME:color` pair per line.

use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::BookResult;
use crate::model::{Group, GroupColor, GroupName};

/// Parses color file contents. Malformed lines are skipped with a warning.
pub fn parse_group_colors(contents: &str) -> HashMap<GroupName, GroupColor> {
    let mut colors = HashMap::new();
    for (number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((name, color)) = line.split_once(':') else {
            warn!("Skipping group color line {}: missing ':'", number + 1);
            continue;
        };
        match (GroupName::parse(name), color.parse::<GroupColor>()) {
            (Ok(name), Ok(color)) => {
                colors.insert(name, color);
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Skipping group color line {}: {}", number + 1, e);
            }
        }
    }
    colors
}

/// Reads the color file at `path`. A missing file yields no colors.
pub fn read_group_colors(path: &Path) -> BookResult<HashMap<GroupName, GroupColor>> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let colors = parse_group_colors(&contents);
            info!("Loaded {} group colors from {}", colors.len(), path.display());
            Ok(colors)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Group color file {} not found. Using default colors.", path.display());
            Ok(HashMap::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes every group that has a color other than the default.
pub fn write_group_colors(path: &Path, groups: &[Group]) -> BookResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let contents: String = groups
        .iter()
        .filter(|g| g.color != GroupColor::Undefined)
        .map(|g| format!("{}:{}\n", g.name, g.color))
        .collect();
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_lines_and_skips_bad_ones() {
        let colors = parse_group_colors("CS1010:red\nnot a line\nCS2010:purple\n\nCS2103:Teal\n");
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[&GroupName::parse("CS1010").unwrap()], GroupColor::Red);
        assert_eq!(colors[&GroupName::parse("CS2103").unwrap()], GroupColor::Teal);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let colors = read_group_colors(&dir.path().join("absent.txt")).unwrap();
        assert!(colors.is_empty());
    }

    #[test]
    fn write_then_read_keeps_colored_groups_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("groupColors.txt");
        let groups = vec![
            Group::with_color(GroupName::parse("CS1010").unwrap(), GroupColor::Blue),
            Group::named("CS2010").unwrap(),
        ];
        write_group_colors(&path, &groups).unwrap();

        let colors = read_group_colors(&path).unwrap();
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[&GroupName::parse("CS1010").unwrap()], GroupColor::Blue);
    }
}
