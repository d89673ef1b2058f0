use std::path::PathBuf;

#[test]
#[ignore]
fn compile_test() {
    let mut config = compiletest_rs::Config {
        mode: compiletest_rs::common::CompileFail,
        src_base: PathBuf::from("tests/compile-fail"),
        //compile_error! is emitted as ::core::compile_error!, which 2015 cannot resolve
        target_rustcflags: Some("--edition=2021".to_string()),
        ..Default::default()
    };
    config.link_deps();

    compiletest_rs::run_tests(&config);
}
