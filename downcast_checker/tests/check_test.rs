use anyhow::Result;
use downcast_checker::{
    check::{StderrSink, check_source, write_artifacts},
    edit::apply_edits,
    file::SourceFile,
};
use downcast_engine::{Config, Diagnostic, DowncastMode, ReplacementEdit, Severity, Summary};

const TEST_CPP: &str = include_str!("data/test.cpp");

const TEST_CPP_BF16_REPORT: &str = r#"[
  {
    "value": 3.141593,
    "downcast": 3.140625,
    "error": 0.000308,
    "mode": "bf16",
    "safe": true,
    "location": "test.cpp:6, col 16"
  },
  {
    "value": 2.718282,
    "downcast": 2.703125,
    "error": 0.005576,
    "mode": "bf16",
    "safe": false,
    "location": "test.cpp:6, col 29"
  },
  {
    "value": 1.414214,
    "downcast": 1.414062,
    "error": 0.000107,
    "mode": "bf16",
    "safe": true,
    "location": "test.cpp:6, col 42"
  },
  {
    "value": 1.000000,
    "downcast": 1.000000,
    "error": 0.000000,
    "mode": "bf16",
    "safe": true,
    "location": "test.cpp:10, col 41"
  },
  {
    "value": 0.000000,
    "downcast": 0.000000,
    "error": 0.000000,
    "mode": "bf16",
    "safe": true,
    "location": "test.cpp:11, col 17"
  }
]
"#;

fn edit(range: std::ops::Range<usize>, text: &str) -> ReplacementEdit {
    ReplacementEdit {
        range,
        text: text.to_owned(),
    }
}

#[test]
fn test_check_bf16() -> Result<()> {
    let source = SourceFile::new("test.cpp", TEST_CPP);
    let config = Config::new(0.001, DowncastMode::BFLike)?;
    let output = check_source(&source, config, Vec::new())?;

    let expected = TEST_CPP
        .replace("3.1415926f", "__bf16(3.14062500)")
        .replace("1.4142135f", "__bf16(1.41406250)")
        .replace("1.0f", "__bf16(1.00000000)")
        .replace("0.0f", "__bf16(0.00000000)");
    assert_eq!(output.rewritten, expected);
    assert!(output.rewritten.contains("+ 2.7182818f -"));
    assert!(output.rewritten.contains("data(10'000'000, __bf16(1.00000000));"));

    assert_eq!(output.report, TEST_CPP_BF16_REPORT);
    assert_eq!(
        output.summary,
        Summary {
            exact: 2,
            within_threshold: 2,
            over_threshold: 1,
        }
    );

    let rendered: Vec<String> = output.sink.iter().map(Diagnostic::to_string).collect();
    assert_eq!(
        rendered,
        [
            "test.cpp:6:16: warning: float literal `3.141593` can be downcast to `__bf16` within acceptable error",
            "test.cpp:6:16: note: relative error is 0.000308, threshold is 0.001000",
            "test.cpp:6:29: note: converting to `__bf16` would introduce relative error of 0.005576, exceeding threshold 0.001000",
            "test.cpp:6:42: warning: float literal `1.414214` can be downcast to `__bf16` within acceptable error",
            "test.cpp:6:42: note: relative error is 0.000107, threshold is 0.001000",
            "test.cpp:10:41: warning: float literal `1.000000` can be safely downcast to `__bf16`",
            "test.cpp:11:17: warning: float literal `0.000000` can be safely downcast to `__bf16`",
        ]
    );
    Ok(())
}

#[test]
fn test_check_fp16() -> Result<()> {
    let source = SourceFile::new("test.cpp", TEST_CPP);
    let output = check_source(&source, Config::default(), ())?;

    // 2.7182818f is within 0.001 when narrowed to half
    assert_eq!(
        output.summary,
        Summary {
            exact: 2,
            within_threshold: 3,
            over_threshold: 0,
        }
    );
    assert!(output.rewritten.contains("x * __fp16(3.14062500) + __fp16("));
    assert!(!output.rewritten.contains("2.7182818f"));
    assert!(output.report.contains(r#""mode": "fp16""#));
    assert!(!output.report.contains("bf16"));
    Ok(())
}

#[test]
fn test_check_nothing_safe() -> Result<()> {
    let source = SourceFile::new("a.c", "double x = 1e-9; // tiny\n");
    let output = check_source(&source, Config::default(), Vec::new())?;

    assert_eq!(output.rewritten, "double x = 1e-9; // tiny\n");
    assert_eq!(output.summary.over_threshold, 1);
    assert_eq!(output.sink.len(), 1);
    assert_eq!(output.sink[0].severity, Severity::Note);
    assert!(output.report.contains(r#""error": 1.000000"#));
    Ok(())
}

#[test]
fn test_check_no_literals() -> Result<()> {
    let source = SourceFile::new("a.c", "int main() { return 0; }\n");
    let output = check_source(&source, Config::default(), StderrSink { quiet: true })?;
    assert_eq!(output.rewritten, source.text());
    assert_eq!(output.report, "[]\n");
    assert_eq!(output.summary.total(), 0);
    Ok(())
}

#[test]
fn test_check_keeps_include_lines() -> Result<()> {
    let text = "#include <python3.8/Python.h>\n#include <glib-2.0/glib.h>\nfloat f = 2.0f;\n";
    let source = SourceFile::new("inc.cpp", text);
    let output = check_source(&source, Config::default(), Vec::new())?;

    assert_eq!(
        output.rewritten,
        "#include <python3.8/Python.h>\n#include <glib-2.0/glib.h>\nfloat f = __fp16(2.00000000);\n"
    );
    assert_eq!(output.summary.total(), 1);
    assert!(output.report.contains(r#""location": "inc.cpp:3, col 11""#));
    Ok(())
}

#[test]
fn test_write_artifacts() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = SourceFile::new("a.c", "float f = 0.5f;\n");
    let output = check_source(&source, Config::default(), ())?;

    let modified = dir.path().join("modified.cpp");
    let report = dir.path().join("float_map.json");
    write_artifacts(&output, &modified, &report)?;

    assert_eq!(
        std::fs::read_to_string(&modified)?,
        "float f = __fp16(0.50000000);\n"
    );
    assert_eq!(std::fs::read_to_string(&report)?, output.report);

    let missing = dir.path().join("no/such/dir/modified.cpp");
    assert!(write_artifacts(&output, &missing, &report).is_err());
    Ok(())
}

#[test]
fn test_read_source() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::create_dir(dir.path().join("src"))?;
    std::fs::write(dir.path().join("src/k.cpp"), "auto k = 2.0;\n")?;

    let source = SourceFile::read(relative_path::RelativePath::new("src/k.cpp"), dir.path())?;
    assert_eq!(source.name(), "src/k.cpp");
    assert_eq!(source.text(), "auto k = 2.0;\n");

    let missing = SourceFile::read(relative_path::RelativePath::new("nope.cpp"), dir.path());
    assert!(missing.is_err());
    Ok(())
}

#[test]
fn test_apply_edits() -> Result<()> {
    let src = "a = 1.5f + 2.5f;";
    assert_eq!(apply_edits(src, &[])?, src);

    // Order of the edit list doesn't matter
    let edits = [edit(11..15, "Y"), edit(4..8, "X")];
    assert_eq!(apply_edits(src, &edits)?, "a = X + Y;");

    // Adjacent and empty ranges
    let edits = [edit(0..1, "b"), edit(1..1, "!"), edit(1..2, "")];
    assert_eq!(apply_edits(src, &edits)?, "b!= 1.5f + 2.5f;");
    Ok(())
}

#[test]
fn test_apply_edits_errors() {
    let src = "x = 1.0; // π";
    assert!(apply_edits(src, &[edit(4..7, "a"), edit(6..8, "b")]).is_err());
    assert!(apply_edits(src, &[edit(4..100, "a")]).is_err());
    assert!(apply_edits(src, &[edit(13..14, "p")]).is_err());
    #[allow(clippy::reversed_empty_ranges)]
    let backwards = edit(7..4, "a");
    assert!(apply_edits(src, &[backwards]).is_err());
}
