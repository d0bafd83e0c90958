use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("faro")
        .version("1.0.0")
        .author("Faro Contributors")
        .about("Discover how news sites search and collect their headlines")
        .arg(clap::arg!(-v --verbose "Enable step-by-step progress output").global(true))
        .subcommand(
            clap::Command::new("discover")
                .about("Discover search and extraction selectors for one or more sites")
                .arg(clap::arg!(<URL> ... "Site front-page URLs"))
                .arg(clap::arg!(--term <TERM> "Search term used to probe each site").default_value("notícias"))
                .arg(
                    clap::arg!(-o --out <DIR> "Directory for discovered configuration files")
                        .default_value("configs")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("15"))
                .arg(clap::arg!(--delay <SECS> "Pause between sites in seconds").default_value("2"))
                .arg(clap::arg!(--"no-validate" "Skip the verification pass after discovery")),
        )
        .subcommand(
            clap::Command::new("collect")
                .about("Collect headlines using stored configurations")
                .arg(
                    clap::arg!(--configs <DIR> "Directory holding configuration files")
                        .default_value("configs")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    clap::arg!(-o --out <DIR> "Directory the aggregated feed is written to")
                        .default_value("configs")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(clap::arg!(--"max-items" <NUM> "Maximum items taken per site").default_value("5"))
                .arg(clap::arg!(--"feed-cap" <NUM> "Maximum items in the aggregated feed").default_value("15"))
                .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("15"))
                .arg(clap::arg!(--delay <SECS> "Pause between sites in seconds").default_value("2")),
        )
        .subcommand(
            clap::Command::new("validate")
                .about("Re-check stored configurations against the live sites")
                .arg(
                    clap::arg!(--configs <DIR> "Directory holding configuration files")
                        .default_value("configs")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("15"))
                .arg(clap::arg!(--delay <SECS> "Pause between sites in seconds").default_value("2")),
        )
        .subcommand(
            clap::Command::new("inspect")
                .about("Inspect a saved results page and print the selectors discovery would pick")
                .arg(clap::arg!(<FILE> "Local HTML file of a search-results page").value_parser(clap::value_parser!(std::path::PathBuf)))
                .arg(clap::arg!(--url <URL> "Site base URL the page came from")),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "faro", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "faro", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "faro", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "faro", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
