use duct::cmd;

pub fn run_cli(
    ovmf_code: Option<&str>,
    release: bool,
    add_file: Option<&[String]>,
) -> anyhow::Result<()> {
    let mut run_args = vec!["-d"];
    let mut build_args = vec![
        "build",
        "--bin",
        "bootentry-cli",
        "--target",
        "x86_64-unknown-uefi",
    ];

    if let Some(ovmf_code) = ovmf_code {
        run_args.extend(["-b", ovmf_code]);
    }

    for file in add_file.unwrap_or_default() {
        run_args.extend(["-f", file.as_str()]);
    }

    if release {
        build_args.extend(["--profile", "release-lto"]);
        run_args.push("target/x86_64-unknown-uefi/release-lto/bootentry-cli.efi");
    } else {
        run_args.push("target/x86_64-unknown-uefi/debug/bootentry-cli.efi");
    }

    cmd!("cargo", "install", "uefi-run").run()?; // will not install if its already installed
    cmd("cargo", build_args).run()?;
    if let Err(e) = cmd("uefi-run", run_args).run() {
        println!(
            "hint: if the error was that the PC BIOS could not be loaded, you may have to specify ovmf-code"
        );
        return Err(e.into());
    }
    Ok(())
}
