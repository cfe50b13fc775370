use crate::error::Result;
use std::fs;
use std::path::PathBuf;

/// Enumerate the file-backed modules mapped into a live process, in load
/// order, by reading `/proc/<pid>/maps`.
///
/// Each module appears once, at the position of its first mapping. Pseudo
/// entries like `[heap]` and `[vdso]` and anonymous mappings carry no debug
/// info and are filtered out here.
pub fn process_modules(pid: u32) -> Result<Vec<PathBuf>> {
    let maps = fs::read_to_string(format!("/proc/{}/maps", pid))?;
    Ok(parse_maps(&maps))
}

fn parse_maps(maps: &str) -> Vec<PathBuf> {
    let mut modules: Vec<PathBuf> = Vec::new();

    for line in maps.lines() {
        // Format: address perms offset dev inode pathname
        let Some(path) = line.splitn(6, ' ').nth(5) else {
            continue;
        };
        let path = path.trim_start();
        let path = path.strip_suffix(" (deleted)").unwrap_or(path);

        if path.is_empty() || path.starts_with('[') {
            continue;
        }

        let path = PathBuf::from(path);
        if !modules.contains(&path) {
            modules.push(path);
        }
    }

    modules
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPS: &str = "\
55d1c0a00000-55d1c0a02000 r--p 00000000 fd:01 1834 /usr/bin/cat
55d1c0a02000-55d1c0a07000 r-xp 00002000 fd:01 1834 /usr/bin/cat
55d1c2a51000-55d1c2a72000 rw-p 00000000 00:00 0    [heap]
7f2a54a00000-7f2a54a28000 r--p 00000000 fd:01 3203 /usr/lib/libc.so.6
7f2a54a28000-7f2a54b9d000 r-xp 00028000 fd:01 3203 /usr/lib/libc.so.6
7f2a54c00000-7f2a54c01000 rw-p 00000000 00:00 0
7f2a54d00000-7f2a54d02000 r-xp 00000000 fd:01 4410 /tmp/plugin.so (deleted)
7ffc12b00000-7ffc12b02000 r-xp 00000000 00:00 0    [vdso]
";

    #[test]
    fn parses_modules_in_first_seen_order() {
        let modules = parse_maps(MAPS);
        assert_eq!(
            modules,
            vec![
                PathBuf::from("/usr/bin/cat"),
                PathBuf::from("/usr/lib/libc.so.6"),
                PathBuf::from("/tmp/plugin.so"),
            ]
        );
    }

    #[test]
    fn skips_pseudo_and_anonymous_entries() {
        let modules = parse_maps(MAPS);
        assert!(modules.iter().all(|m| !m.to_string_lossy().starts_with('[')));
    }

    #[test]
    fn empty_maps_yields_no_modules() {
        assert!(parse_maps("").is_empty());
    }
}
