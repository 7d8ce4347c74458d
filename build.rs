use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// 内置翻译目录所在目录
const I18N_DIR: &str = "resources/i18n";

fn main() {
    // 告诉 Cargo 当翻译文件改变时重新运行 build script
    println!("cargo:rerun-if-changed={}", I18N_DIR);

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let i18n_dir = Path::new(&manifest_dir).join(I18N_DIR);

    let mut catalogs = collect_catalogs(&i18n_dir);
    catalogs.sort();

    // 生成 (locale, 内容) 表，供 BundledSource 使用
    let mut generated = String::from("pub(crate) static BUNDLED_CATALOGS: &[(&str, &str)] = &[\n");
    for (locale, path) in &catalogs {
        println!("cargo:rerun-if-changed={}", path.display());
        generated.push_str(&format!(
            "    ({:?}, include_str!({:?})),\n",
            locale,
            path.to_string_lossy()
        ));
    }
    generated.push_str("];\n");

    let target = out_dir.join("bundled_catalogs.rs");
    if let Err(e) = fs::write(&target, generated) {
        println!("cargo:warning=Failed to write {}: {}", target.display(), e);
    }
}

/// 收集目录下所有 .ts 文件，文件名即 locale
fn collect_catalogs(dir: &Path) -> Vec<(String, PathBuf)> {
    let mut catalogs = Vec::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => {
            println!("cargo:warning={} not found, no catalogs bundled", dir.display());
            return catalogs;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "ts") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                catalogs.push((stem.to_string(), path.clone()));
            }
        }
    }

    catalogs
}
