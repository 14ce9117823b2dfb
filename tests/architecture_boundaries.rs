use std::fs;
use std::path::{Path, PathBuf};

fn rs_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

fn rel(path: &Path) -> String {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let rel = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();
    rel.replace('\\', "/")
}

#[test]
fn sysinfo_is_confined_to_the_probe() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut violations = Vec::new();

    for file in rs_files(&root) {
        let rel_path = rel(&file);
        if rel_path == "src/system/probe.rs" {
            continue;
        }
        let content = fs::read_to_string(&file).unwrap_or_default();
        if content.contains("sysinfo") {
            violations.push(format!("{} reaches into `sysinfo` directly", rel_path));
        }
    }

    assert!(
        violations.is_empty(),
        "OS probe boundary violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn rendering_modules_are_pure() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut violations = Vec::new();

    for file in [root.join("src/report.rs"), root.join("src/format.rs")] {
        let content = fs::read_to_string(&file).unwrap_or_default();
        for forbidden in ["sysinfo", "std::fs", "std::process", "std::net"] {
            if content.contains(forbidden) {
                violations.push(format!(
                    "{} imports forbidden dependency `{}`",
                    rel(&file),
                    forbidden
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Rendering purity violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn wall_clock_reads_are_scoped_to_the_collector() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut violations = Vec::new();

    for file in rs_files(&root) {
        let rel_path = rel(&file);
        if rel_path == "src/system/collector.rs" {
            continue;
        }
        let content = fs::read_to_string(&file).unwrap_or_default();
        if content.contains("SystemTime::now") {
            violations.push(format!(
                "{} reads the wall clock outside the collector",
                rel_path
            ));
        }
    }

    assert!(
        violations.is_empty(),
        "Wall clock boundary violations:\n{}",
        violations.join("\n")
    );
}
