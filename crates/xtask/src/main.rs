use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

/// Enforce the layering rule: domain depends on nothing internal, and
/// protocol depends only on domain.
fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: serde_json::Value =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let packages = metadata["packages"]
        .as_array()
        .context("metadata has no packages")?;

    let forbidden: &[(&str, &[&str])] = &[
        ("deiquest-domain", &["deiquest-protocol", "deiquest-client"]),
        ("deiquest-protocol", &["deiquest-client"]),
    ];

    for package in packages {
        let name = package["name"].as_str().unwrap_or_default();
        let Some((_, banned)) = forbidden.iter().find(|(n, _)| *n == name) else {
            continue;
        };
        if let Some(deps) = package["dependencies"].as_array() {
            for dep in deps {
                let dep_name = dep["name"].as_str().unwrap_or_default();
                if banned.contains(&dep_name) {
                    anyhow::bail!("layering violation: {name} must not depend on {dep_name}");
                }
            }
        }
    }

    println!("arch-check: ok");
    Ok(())
}
