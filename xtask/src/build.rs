use duct::cmd;

pub fn build_cli(
    release: bool,
    target: &str,
    features: Option<Vec<String>>,
    no_default_features: bool,
) -> anyhow::Result<()> {
    let mut build_args = vec!["build", "--package", "bootentry-cli", "--target", target];

    if release {
        build_args.extend(["--profile", "release-lto"]);
    }

    let features = features.unwrap_or_default().join(",");
    if !features.is_empty() {
        build_args.push("--features");
        build_args.push(&features);
    }

    if no_default_features {
        build_args.push("--no-default-features");
    }

    cmd("cargo", build_args).run()?;
    Ok(())
}
