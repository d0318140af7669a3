//! Common test utilities for alps integration tests.
//!
//! This module provides shared helper functions used across all
//! integration test files.

// Each test file is compiled as a separate crate, so not all functions
// are used in every test file. This is expected behavior.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use alps::ast::Block;
use alps::emit::Emitter;
use alps::lexer::Lexer;
use alps::parser::{ParseError, Parser};
use alps::source::SourceMap;

/// Returns the path to the alps binary built by cargo.
pub fn alps_binary() -> String {
    env!("CARGO_BIN_EXE_alps").to_string()
}

/// Compiles source text in-process through the full pipeline.
pub fn compile_to_asm(source: &str) -> Result<String, String> {
    let mut map = SourceMap::new();
    let id = map.add("test.alps", source);
    let tokens = Lexer::new(map.text(id), id)
        .tokenize()
        .map_err(|e| e.to_string())?;
    let program = Parser::new(tokens, id, &mut map)
        .parse()
        .map_err(|e| e.to_string())?;

    let mut out = Vec::new();
    Emitter::new(&map, &mut out)
        .emit_program(&program)
        .map_err(|e| e.to_string())?;
    Ok(String::from_utf8(out).expect("emitted assembly is UTF-8"))
}

/// Parses a source file from disk, with include resolution relative to
/// the file's directory.
pub fn parse_file(path: &Path) -> Result<(SourceMap, Block), ParseError> {
    let text = std::fs::read_to_string(path).expect("read test source file");
    let mut map = SourceMap::new();
    let id = map.add(path.display().to_string(), text);
    let tokens = Lexer::new(map.text(id), id)
        .tokenize()
        .expect("lex test source file");
    let result = Parser::with_source_path(tokens, id, &mut map, path).parse();
    result.map(|program| (map, program))
}

/// Writes `content` to `name` inside `dir` and returns the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create test directories");
    }
    std::fs::write(&path, content).expect("write test source");
    path
}

/// Writes a source file and runs `alps build` on it.
pub fn run_build(dir: &Path, name: &str, source: &str) -> Output {
    let path = write_file(dir, name, source);
    Command::new(alps_binary())
        .arg("build")
        .arg(&path)
        .output()
        .expect("run alps binary")
}

/// Writes a source file and runs `alps build -o <output>` on it.
pub fn run_build_with_output(dir: &Path, name: &str, source: &str, output: &Path) -> Output {
    let path = write_file(dir, name, source);
    Command::new(alps_binary())
        .arg("build")
        .arg(&path)
        .arg("-o")
        .arg(output)
        .output()
        .expect("run alps binary")
}

/// Writes a source file and runs an arbitrary alps subcommand on it.
pub fn run_subcommand(dir: &Path, subcommand: &str, name: &str, source: &str) -> Output {
    let path = write_file(dir, name, source);
    Command::new(alps_binary())
        .arg(subcommand)
        .arg(&path)
        .output()
        .expect("run alps binary")
}

/// Returns stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Returns stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Reads the assembly file the build wrote next to `name` in `dir`.
pub fn read_asm(dir: &Path, name: &str) -> String {
    let path = dir.join(name).with_extension("s");
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read emitted assembly {:?}: {}", path, e))
}
