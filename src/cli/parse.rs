use plugdeps::Plugin;
use tracing::info;

pub(crate) fn run(inputs: Vec<String>, url: Option<String>, format: super::Format) {
    let mut plugins = Vec::new();
    let mut failed = false;

    for input in &inputs {
        let parsed = Plugin::parse(input).and_then(|p| match &url {
            Some(url) => Plugin::new(p.name(), p.version(), url.as_str()),
            None => Ok(p),
        });
        match parsed {
            Ok(p) => {
                info!(plugin = %p, "valid plugin");
                plugins.push(p);
            }
            Err(e) => {
                eprintln!("plugdeps parse: {e}");
                failed = true;
            }
        }
    }

    match format {
        super::Format::Text => {
            for p in &plugins {
                println!("{p}");
            }
        }
        super::Format::Json => super::print_json(&plugins),
    }

    if failed {
        std::process::exit(1);
    }
}
