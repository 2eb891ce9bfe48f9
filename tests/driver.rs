use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn scratch_dir(name: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("nanocc-{}-{name}-{n}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_source(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    path
}

fn nanocc(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nanocc"))
        .args(args)
        .output()
        .unwrap()
}

fn compile_to(dir: &Path, name: &str, source: &str) -> (Output, PathBuf) {
    let input = write_source(dir, name, source);
    let output = input.with_extension("s");
    let out = nanocc(&[Path::new("-S"), &input, Path::new("-o"), &output]);
    (out, output)
}

#[test]
fn test_compile_writes_assembly() {
    let dir = scratch_dir("basic");
    let (out, asm) = compile_to(&dir, "ret.c", "int main(void) { return 42; }");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = fs::read_to_string(asm).unwrap();
    assert!(text.contains(".globl"));
    assert!(text.contains("main:"));
}

#[test]
fn test_missing_output_flag_is_usage_error() {
    let dir = scratch_dir("no-output");
    let input = write_source(&dir, "ret.c", "int main(void) { return 0; }");
    let out = nanocc(&[Path::new("-S"), &input]);
    assert_eq!(Some(2), out.status.code());
    assert!(!input.with_extension("s").exists());
}

#[test]
fn test_dash_c_is_rejected() {
    let dir = scratch_dir("dash-c");
    let input = write_source(&dir, "ret.c", "int main(void) { return 0; }");
    let output = input.with_extension("s");
    let out = nanocc(&[Path::new("-c"), &input, Path::new("-o"), &output]);
    assert_eq!(Some(1), out.status.code());
    assert!(String::from_utf8_lossy(&out.stderr).contains("usage error"));
    assert!(!output.exists());
}

#[test]
fn test_semantic_error_leaves_no_output() {
    let dir = scratch_dir("undeclared");
    let (out, asm) = compile_to(&dir, "bad.c", "int main(void) { return missing(); }");
    assert_eq!(Some(1), out.status.code());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("nanocc: semantic error:"), "{stderr}");
    assert!(!asm.exists());
}

#[test]
fn test_parse_error_reports_position() {
    let dir = scratch_dir("parse");
    let (out, asm) = compile_to(&dir, "bad.c", "int main(void) {\n  return 1\n}");
    assert_eq!(Some(1), out.status.code());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("nanocc: parse error: 3:1:"), "{stderr}");
    assert!(!asm.exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = scratch_dir("missing");
    let input = dir.join("nope.c");
    let output = dir.join("nope.s");
    let out = nanocc(&[Path::new("-S"), &input, Path::new("-o"), &output]);
    assert_eq!(Some(1), out.status.code());
    assert!(!output.exists());
}

#[test]
fn test_stage_flag_prints_and_writes_nothing() {
    let dir = scratch_dir("lex");
    let input = write_source(&dir, "ret.c", "int main(void) { return 0; }");
    let output = input.with_extension("s");
    let out = nanocc(&[Path::new("--lex"), &input, Path::new("-o"), &output]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Return"));
    assert!(!output.exists());
}

#[test]
fn test_stage_flag_does_not_need_output() {
    let dir = scratch_dir("parse-only");
    let input = write_source(&dir, "ret.c", "int main(void) { return 0; }");
    let out = nanocc(&[Path::new("--parse"), &input]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("FunctionDecl"));
    assert!(!input.with_extension("s").exists());
}

#[test]
fn test_output_is_deterministic() {
    let dir = scratch_dir("determinism");
    let source = "int add(int a, int b); int main(void) { return add(1, 2) * 3; }";
    let (_, first) = compile_to(&dir, "a.c", source);
    let (_, second) = compile_to(&dir, "b.c", source);
    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[cfg(all(target_arch = "x86_64", target_os = "linux"))]
mod end_to_end {
    use super::*;

    fn has_gcc() -> bool {
        Command::new("gcc").arg("--version").output().is_ok_and(|o| o.status.success())
    }

    /// Compiles each source, links the results and returns the program's exit code.
    fn build_and_run(name: &str, sources: &[&str]) -> Option<i32> {
        build_and_run_with_c(name, sources, &[])
    }

    /// Like [build_and_run], with extra C files compiled by gcc into the same program.
    fn build_and_run_with_c(name: &str, sources: &[&str], c_sources: &[&str]) -> Option<i32> {
        if !has_gcc() {
            eprintln!("gcc not found, skipping");
            return None;
        }
        let dir = scratch_dir(name);
        let mut asm_files = vec![];
        for (i, source) in sources.iter().enumerate() {
            let (out, asm) = compile_to(&dir, &format!("unit{i}.c"), source);
            assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
            asm_files.push(asm);
        }
        for (i, source) in c_sources.iter().enumerate() {
            asm_files.push(write_source(&dir, &format!("native{i}.c"), source));
        }
        let exe = dir.join("prog");
        let status = Command::new("gcc")
            .args(&asm_files)
            .arg("-o")
            .arg(&exe)
            .status()
            .unwrap();
        assert!(status.success());
        Command::new(&exe).status().unwrap().code()
    }

    #[test]
    fn test_return_constant() {
        if let Some(code) = build_and_run("ret42", &["int main(void) { return 42; }"]) {
            assert_eq!(42, code);
        }
    }

    #[test]
    fn test_precedence() {
        if let Some(code) = build_and_run("prec", &["int main(void) { return 2 + 3 * 4; }"]) {
            assert_eq!(14, code);
        }
    }

    #[test]
    fn test_forward_calls() {
        let source = "
            int square(int x);
            int cube(int x);
            int main(void) { return square(3) + cube(2); }
            int square(int x) { return x * x; }
            int cube(int x) { int sq = square(x); return sq * x; }
        ";
        if let Some(code) = build_and_run("calls", &[source]) {
            assert_eq!(17, code);
        }
    }

    #[test]
    fn test_cross_file_linking() {
        let lib = "int get_value(void) { return 7; }";
        let main = "int get_value(void); int main(void) { return get_value(); }";
        if let Some(code) = build_and_run("link", &[lib, main]) {
            assert_eq!(7, code);
        }
    }

    #[test]
    fn test_nested_calls_across_files() {
        let lib = "
            int double_value(int x) { return x + x; }
            int add_five(int x) { return x + 5; }
        ";
        let main = "
            int double_value(int x);
            int add_five(int x);
            int main(void) { return add_five(double_value(10)); }
        ";
        if let Some(code) = build_and_run("nested", &[lib, main]) {
            assert_eq!(25, code);
        }
    }

    #[test]
    fn test_six_arguments() {
        let source = "
            int sum(int a, int b, int c, int d, int e, int f) { return a + b + c + d + e + f; }
            int main(void) { return 1 + sum(1, 2, 3, 4, 5, 6); }
        ";
        if let Some(code) = build_and_run("six", &[source]) {
            assert_eq!(22, code);
        }
    }

    // `is_minus_44` takes a `long` on the C side so it observes all 64 bits
    // of the argument register.
    const NATIVE_HELPERS: &str = "
        #include <stdlib.h>

        int neg(int a, int b, int c) { return -(a + b + c); }

        int check_alignment(void) {
            if ((unsigned long)__builtin_frame_address(0) % 16 != 0)
                abort();
            return 1;
        }

        int is_minus_44(long v) { return v == -44; }
    ";

    #[test]
    fn test_linking_with_gcc_code() {
        let source = "
            int neg(int a, int b, int c);
            int check_alignment(void);
            int is_minus_44(int v);
            int main(void) {
                int x = 3;
                int y = 5;
                int r = 100 + (x + 2 * (y + check_alignment() * neg(1, 2 + check_alignment(), 40 * 1)));
                return r + 50 * is_minus_44(neg(1, 3, 40));
            }
        ";
        if let Some(code) = build_and_run_with_c("native", &[source], &[NATIVE_HELPERS]) {
            assert_eq!(75, code);
        }
    }

    #[test]
    fn test_gcc_code_calls_back() {
        let native = "
            int triple(int x);
            int apply_twice(int x) { return triple(triple(x)) - 100; }
        ";
        let source = "
            int apply_twice(int x);
            int triple(int x) { return x * 3; }
            int main(void) { return apply_twice(4) + 200; }
        ";
        if let Some(code) = build_and_run_with_c("callback", &[source], &[native]) {
            assert_eq!(136, code);
        }
    }
}
