//! Structural checks keeping `tests/unit` a mirror of `src`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";

    // Files that only wire modules together or start the binary
    fn is_wiring_file(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn mirrored_trees() -> (BTreeSet<String>, BTreeSet<String>) {
        let src_root = Path::new(SRC_ROOT);
        let unit_root = Path::new(UNIT_ROOT);
        assert!(src_root.is_dir(), "Missing source directory '{SRC_ROOT}'");

        let sources = relative_entries(src_root, src_root).unwrap_or_else(|error| {
            unreachable!("Failed to walk '{SRC_ROOT}': {error}");
        });
        let units = relative_entries(unit_root, unit_root).unwrap_or_default();
        (sources, units)
    }

    // Tests every source module has a unit test file at the same relative path
    // Verified by adding a source file without a test file
    #[test]
    fn test_sources_have_unit_tests() {
        let (sources, units) = mirrored_trees();

        let missing: Vec<String> = sources
            .iter()
            .filter(|path| !is_wiring_file(path) && !units.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source paths without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives the module it covers
    // Verified by renaming a source module
    #[test]
    fn test_unit_tests_have_sources() {
        let (sources, units) = mirrored_trees();

        let orphaned: Vec<String> = units
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !sources.contains(*path))
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test paths without a source module:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every test file declares at least one test
    // Verified by emptying a unit test module
    #[test]
    fn test_test_files_declare_tests() {
        let tests_root = Path::new("tests");
        let mut empty = Vec::new();

        if let Err(error) = collect_files_without_tests(tests_root, tests_root, &mut empty) {
            unreachable!("Failed to walk 'tests': {error}");
        }

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty.join("\n")
        );
    }

    fn relative_entries(dir: &Path, root: &Path) -> io::Result<BTreeSet<String>> {
        let mut entries = BTreeSet::new();
        if !dir.is_dir() {
            return Ok(entries);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(root)
                .map_err(|error| io::Error::other(error.to_string()))?
                .to_string_lossy()
                .into_owned();

            if path.is_dir() {
                entries.extend(relative_entries(&path, root)?);
                entries.insert(relative);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                entries.insert(relative);
            }
        }
        Ok(entries)
    }

    fn collect_files_without_tests(
        dir: &Path,
        root: &Path,
        empty: &mut Vec<String>,
    ) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_dir() {
                collect_files_without_tests(&path, root, empty)?;
                continue;
            }
            if path.extension().is_none_or(|ext| ext != "rs") {
                continue;
            }

            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if name == "mod.rs" || (name == "main.rs" && path.parent() == Some(root)) {
                continue;
            }

            if !fs::read_to_string(&path)?.contains("#[test]") {
                empty.push(format!("  - {}", path.display()));
            }
        }
        Ok(())
    }
}
