//! Tests for progress tracking across loading and scanning

#[cfg(test)]
mod tests {
    use mosaictile::io::progress::ProgressManager;
    use std::path::Path;

    // Tests a full load-then-scan lifecycle
    // Verified by panicking when the scan starts before loading
    #[test]
    fn test_progress_lifecycle() {
        let mut pm = ProgressManager::new();

        pm.start_loading("tiles", 2);
        pm.advance_loading(Path::new("a.jpg"));
        pm.advance_loading(Path::new("b.jpg"));
        pm.start_scan(3);
        pm.update_rows(1);
        pm.update_rows(3);
        pm.finish();
    }

    // Tests updates before any stage starts are ignored
    // Verified by unwrapping missing bars
    #[test]
    fn test_updates_without_bars() {
        let pm = ProgressManager::default();

        pm.advance_loading(Path::new("a.jpg"));
        pm.update_rows(5);
        pm.finish();
    }

    // Tests the scan can run without a loading stage
    // Verified by requiring a loading bar in start_scan
    #[test]
    fn test_scan_only() {
        let mut pm = ProgressManager::new();

        pm.start_scan(0);
        pm.update_rows(0);
        pm.finish();
    }
}
