//! Build script to generate the embedded sample dataset
//!
//! Reads a "count password" frequency list and generates Rust source code with a const table.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_frequency_table(
        "data/sample_withcount.txt",
        &Path::new(&out_dir).join("sample.rs"),
        "SAMPLE",
        "Bundled leaked-password frequency sample",
    );

    // Rebuild if the sample changes
    println!("cargo:rerun-if-changed=data/sample_withcount.txt");
}

fn generate_frequency_table(
    input_path: &str,
    output_path: &Path,
    const_name: &str,
    doc_comment: &str,
) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let entries: Vec<(u64, &str)> = content
        .lines()
        .filter_map(|line| {
            let (count, password) = line.trim_start().split_once(' ')?;
            let count = count
                .parse()
                .unwrap_or_else(|e| panic!("Bad count in {input_path}: {line:?}: {e}"));
            Some((count, password))
        })
        .collect();
    let count = entries.len();

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated frequency table").unwrap();
    writeln!(output, "//").unwrap();
    writeln!(output, "// {doc_comment} ({count} entries)").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// {doc_comment} ({count} entries)").unwrap();
    writeln!(output, "pub const {const_name}: &[(&str, u64)] = &[").unwrap();

    for (frequency, password) in entries {
        writeln!(output, "    ({password:?}, {frequency}),").unwrap();
    }

    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of entries in {const_name}").unwrap();
    writeln!(output, "pub const {const_name}_COUNT: usize = {count};").unwrap();
}
