use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct SetupStatus {
    gateway_configured: bool,
    provider_configured: bool,
    dashboard_url: Option<String>,
}

/// Handle `mhz setup`: first-run instructions for an operator.
pub fn handle(flags: &GlobalFlags, config: &mahzan_config::MahzanConfig) -> anyhow::Result<()> {
    let status = SetupStatus {
        gateway_configured: config.gateway.is_configured(),
        provider_configured: config.provider.is_configured(),
        dashboard_url: if config.gateway.dashboard_url.is_empty() {
            None
        } else {
            Some(config.gateway.dashboard_url.clone())
        },
    };

    if !flags.quiet {
        print_instructions(config);
    }
    output(&status, flags.format)
}

fn print_instructions(config: &mahzan_config::MahzanConfig) {
    println!("Mahzan setup");
    println!("============");
    println!();

    if config.gateway.is_configured() {
        println!("1. Content gateway: configured ({}).", config.gateway.url);
    } else {
        println!("1. Content gateway: NOT configured. The archive runs on a local file only.");
        println!("   Set MAHZAN_GATEWAY__URL and MAHZAN_GATEWAY__AUTH_TOKEN, or add a");
        println!("   [gateway] section to ~/.config/mahzan/config.toml.");
    }
    println!();

    if config.provider.is_configured() {
        println!("2. Identity provider: configured ({}).", config.provider.url);
    } else {
        println!("2. Identity provider: NOT configured. Admin commands will be unavailable.");
        println!("   Set MAHZAN_PROVIDER__URL and MAHZAN_PROVIDER__ANON_KEY.");
    }
    println!();

    println!("3. Grant the admin role to an account. In the provider dashboard's SQL");
    println!("   console, run:");
    println!();
    println!("     UPDATE user_profiles SET is_admin = true WHERE email = 'you@example.com';");
    println!();
    if !config.gateway.dashboard_url.is_empty() {
        println!("   Dashboard: {}", config.gateway.dashboard_url);
        println!();
    }
    println!("4. Sign in with `mhz auth login --email you@example.com` and verify with");
    println!("   `mhz auth status`.");
    println!();
}
