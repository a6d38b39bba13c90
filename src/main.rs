use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use camera_ipconfig::assign;
use camera_ipconfig::cameras;
use camera_ipconfig::config::Config;
use camera_ipconfig::utility::{Assignment, IpConfigUtility};

/// Parse and validate an IPv4 dotted-quad address
fn parse_ipv4(s: &str) -> Result<Ipv4Addr, String> {
    s.parse::<Ipv4Addr>()
        .map_err(|_| format!("'{}' is not a valid IPv4 address (e.g. 172.16.1.20)", s))
}

/// Parse and validate a MAC address (six colon-separated hex octets)
fn parse_mac(s: &str) -> Result<String, String> {
    let groups: Vec<&str> = s.split(':').collect();
    let valid = groups.len() == 6
        && groups
            .iter()
            .all(|g| g.len() == 2 && g.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(s.to_string())
    } else {
        Err(format!(
            "'{}' is not a valid MAC address (expected XX:XX:XX:XX:XX:XX)",
            s
        ))
    }
}

/// camera-ipconfig: assign IP addresses to network cameras
#[derive(Parser)]
#[command(name = "camera-ipconfig")]
#[command(version, about = "Assign IP addresses to network cameras")]
#[command(long_about = "Discover network cameras through the vendor IpConfigUtility and \
    assign each one a new IP address via the utility's force and persist operations.")]
#[command(after_help = "EXAMPLES:
    # List detected cameras
    camera-ipconfig list

    # Interactively assign a new IP to each camera
    camera-ipconfig assign

    # Assign with a custom subnet for this run
    camera-ipconfig assign --subnet 255.255.255.0

    # One-shot assignment for a single camera
    camera-ipconfig set --mac 00:30:53:2B:7F:31 --ip 172.16.1.20

    # Use a vendor utility outside the working directory
    camera-ipconfig list --utility /opt/vendor/IpConfigUtility")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List cameras detected by the vendor utility
    #[command(after_help = "EXAMPLES:
    camera-ipconfig list
    camera-ipconfig list --utility /opt/vendor/IpConfigUtility")]
    List {
        /// Path to the vendor IpConfigUtility executable
        #[arg(long, short = 'u')]
        utility: Option<String>,

        /// Custom config file path (default: ~/.config/camera-ipconfig/config.toml)
        #[arg(long, short = 'c')]
        config: Option<String>,
    },

    /// Interactively assign a new IP address to each detected camera
    ///
    /// Prompts for a new IPv4 address per camera, then forces and persists
    /// it through the vendor utility. A blank line skips a camera.
    #[command(after_help = "EXAMPLES:
    camera-ipconfig assign
    camera-ipconfig assign --subnet 255.255.255.0 --gateway 192.168.1.1")]
    Assign {
        /// Subnet mask to apply (default: 255.255.0.0, or from config file)
        #[arg(long, short = 's', value_parser = parse_ipv4)]
        subnet: Option<Ipv4Addr>,

        /// Gateway to apply (default: 0.0.0.0, or from config file)
        #[arg(long, short = 'g', value_parser = parse_ipv4)]
        gateway: Option<Ipv4Addr>,

        /// Path to the vendor IpConfigUtility executable
        #[arg(long, short = 'u')]
        utility: Option<String>,

        /// Custom config file path (default: ~/.config/camera-ipconfig/config.toml)
        #[arg(long, short = 'c')]
        config: Option<String>,
    },

    /// Assign an IP to a single camera by MAC address (non-interactive)
    #[command(after_help = "EXAMPLES:
    camera-ipconfig set --mac 00:30:53:2B:7F:31 --ip 172.16.1.20
    camera-ipconfig set -m 00:30:53:2B:7F:31 -a 172.16.1.20 -s 255.255.255.0")]
    Set {
        /// MAC address of the target camera (XX:XX:XX:XX:XX:XX)
        #[arg(long, short = 'm', value_parser = parse_mac)]
        mac: String,

        /// New IPv4 address to assign
        #[arg(long, short = 'a', value_parser = parse_ipv4)]
        ip: Ipv4Addr,

        /// Subnet mask to apply (default: 255.255.0.0, or from config file)
        #[arg(long, short = 's', value_parser = parse_ipv4)]
        subnet: Option<Ipv4Addr>,

        /// Gateway to apply (default: 0.0.0.0, or from config file)
        #[arg(long, short = 'g', value_parser = parse_ipv4)]
        gateway: Option<Ipv4Addr>,

        /// Path to the vendor IpConfigUtility executable
        #[arg(long, short = 'u')]
        utility: Option<String>,

        /// Custom config file path (default: ~/.config/camera-ipconfig/config.toml)
        #[arg(long, short = 'c')]
        config: Option<String>,
    },
}

/// Load the config file, honoring an explicit --config path.
/// An explicit path must exist and parse. A missing default-path file yields
/// built-in defaults; an existing but unreadable or unparsable one is an
/// error, so a typo in the config cannot silently change which subnet and
/// gateway get written to cameras.
fn load_config(explicit: Option<String>) -> Result<Config, String> {
    match explicit {
        Some(path) => {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(format!("Config file '{}' not found", path.display()));
            }
            Config::load(Some(&path)).map_err(|e| e.to_string())
        }
        None => Config::load(None).map_err(|e| e.to_string()),
    }
}

/// Resolve the vendor utility wrapper: CLI flag > config file > default.
fn resolve_utility(flag: Option<String>, config: &Config) -> IpConfigUtility {
    IpConfigUtility::new(flag.unwrap_or_else(|| config.utility.path.clone()))
}

/// Run the list command: discover cameras and print them.
fn run_list(utility: &IpConfigUtility) -> Result<(), String> {
    let output = utility.list().map_err(|e| e.to_string())?;
    let cameras = cameras::parse_camera_list(&output);
    cameras::print_cameras(&cameras);
    Ok(())
}

/// Run the interactive assign command over stdin/stdout.
fn run_assign(utility: &IpConfigUtility, subnet: &str, gateway: &str) -> Result<(), String> {
    let output = utility.list().map_err(|e| e.to_string())?;
    let cameras = cameras::parse_camera_list(&output);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    let report = assign::assign_all(utility, &cameras, subnet, gateway, &mut input, &mut out)
        .map_err(|e| format!("I/O error during assignment: {}", e))?;

    if report.all_failed() {
        return Err("All assignments failed".to_string());
    }
    Ok(())
}

/// Run the one-shot set command for a single camera.
fn run_set(utility: &IpConfigUtility, assignment: &Assignment) -> Result<(), String> {
    utility.apply(assignment).map_err(|e| e.to_string())?;
    println!(
        "Successfully applied IP {} to camera with MAC {}.",
        assignment.ip, assignment.mac
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::List { utility, config }) => load_config(config).and_then(|cfg| {
            let utility = resolve_utility(utility, &cfg);
            run_list(&utility)
        }),
        Some(Commands::Assign {
            subnet,
            gateway,
            utility,
            config,
        }) => load_config(config).and_then(|cfg| {
            let utility = resolve_utility(utility, &cfg);
            // CLI args > config file > built-in defaults
            let subnet = subnet
                .map(|s| s.to_string())
                .unwrap_or_else(|| cfg.defaults.subnet.clone());
            let gateway = gateway
                .map(|g| g.to_string())
                .unwrap_or_else(|| cfg.defaults.gateway.clone());
            run_assign(&utility, &subnet, &gateway)
        }),
        Some(Commands::Set {
            mac,
            ip,
            subnet,
            gateway,
            utility,
            config,
        }) => load_config(config).and_then(|cfg| {
            let utility = resolve_utility(utility, &cfg);
            let assignment = Assignment {
                mac,
                ip: ip.to_string(),
                subnet: subnet
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| cfg.defaults.subnet.clone()),
                gateway: gateway
                    .map(|g| g.to_string())
                    .unwrap_or_else(|| cfg.defaults.gateway.clone()),
            };
            run_set(&utility, &assignment)
        }),
        None => {
            // Show brief help when no command is provided
            println!("camera-ipconfig {}", env!("CARGO_PKG_VERSION"));
            println!("Assign IP addresses to network cameras\n");
            println!("USAGE:");
            println!("    camera-ipconfig <COMMAND>\n");
            println!("COMMANDS:");
            println!("    list    List cameras detected by the vendor utility");
            println!("    assign  Interactively assign a new IP to each camera");
            println!("    set     Assign an IP to a single camera by MAC address");
            println!("    help    Print this message or the help of a subcommand\n");
            println!("Run 'camera-ipconfig --help' for more details and examples.");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
