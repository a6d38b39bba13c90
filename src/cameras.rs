//! Camera discovery output parsing.
//!
//! This module parses the line-oriented output of `IpConfigUtility /list`
//! into structured camera records.

/// A single camera as reported by the vendor utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    pub index: usize,
    pub mac: String,
    pub ip: String,
    pub subnet: String,
    pub gateway: String,
}

/// Parse the full `/list` output into camera records.
///
/// Lines that do not look like camera entries (banners, headers, prompts)
/// are skipped. Output with no camera lines yields an empty list.
pub fn parse_camera_list(output: &str) -> Vec<Camera> {
    output.lines().filter_map(parse_camera_line).collect()
}

/// Parse a single camera line from the utility output.
///
/// Camera lines have the shape:
/// `[index] mac ip subnet gateway <mode/status columns>`
/// Example: `[0]  00:30:53:2B:7F:31  172.16.1.2  255.255.0.0  0.0.0.0  DHCP`
///
/// Returns `None` for lines that do not match. Trailing columns after the
/// gateway are ignored, but at least one must be present.
pub fn parse_camera_line(line: &str) -> Option<Camera> {
    let line = line.trim_start();

    // Bracketed decimal index prefix.
    let rest = line.strip_prefix('[')?;
    let close_bracket = rest.find(']')?;
    let index: usize = rest[..close_bracket].parse().ok()?;

    let mut fields = rest[close_bracket + 1..].split_whitespace();
    let mac = fields.next()?;
    let ip = fields.next()?;
    let subnet = fields.next()?;
    let gateway = fields.next()?;
    // The vendor appends mode/status columns; a bare address row is not a
    // camera entry.
    fields.next()?;

    if !is_mac_like(mac) {
        return None;
    }
    if ![ip, subnet, gateway].iter().all(|s| is_dotted_quad(s)) {
        return None;
    }

    Some(Camera {
        index,
        mac: mac.to_string(),
        ip: ip.to_string(),
        subnet: subnet.to_string(),
        gateway: gateway.to_string(),
    })
}

/// Loose MAC shape check: hex digits and colon separators only.
fn is_mac_like(s: &str) -> bool {
    !s.is_empty()
        && s.contains(':')
        && s.chars().all(|c| c.is_ascii_hexdigit() || c == ':')
}

/// Loose address shape check: digits and dots only.
///
/// This only filters non-address columns out of the listing; strict IPv4
/// validation applies to user input, not to what the vendor reports.
fn is_dotted_quad(s: &str) -> bool {
    !s.is_empty()
        && s.contains('.')
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Print the camera list to stdout.
pub fn print_cameras(cameras: &[Camera]) {
    if cameras.is_empty() {
        println!("No cameras found.");
        return;
    }

    println!("Detected Cameras:");
    for camera in cameras {
        println!(
            "  [{}] MAC: {}, Current IP: {}, Subnet: {}, Gateway: {}",
            camera.index, camera.mac, camera.ip, camera.subnet, camera.gateway
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camera_line_valid() {
        let line = "[0]  00:30:53:2B:7F:31  172.16.1.2  255.255.0.0  0.0.0.0  Static";
        let camera = parse_camera_line(line).unwrap();
        assert_eq!(camera.index, 0);
        assert_eq!(camera.mac, "00:30:53:2B:7F:31");
        assert_eq!(camera.ip, "172.16.1.2");
        assert_eq!(camera.subnet, "255.255.0.0");
        assert_eq!(camera.gateway, "0.0.0.0");
    }

    #[test]
    fn test_parse_camera_line_leading_whitespace() {
        let line = "  [12] 00:30:53:2B:7F:32 192.168.1.5 255.255.255.0 192.168.1.1 DHCP";
        let camera = parse_camera_line(line).unwrap();
        assert_eq!(camera.index, 12);
        assert_eq!(camera.ip, "192.168.1.5");
    }

    #[test]
    fn test_parse_camera_line_no_trailing_column() {
        // The vendor always appends mode/status columns; without one the
        // line is not a camera entry.
        let line = "[0] 00:30:53:2B:7F:31 172.16.1.2 255.255.0.0 0.0.0.0";
        assert!(parse_camera_line(line).is_none());
    }

    #[test]
    fn test_parse_camera_line_banner() {
        assert!(parse_camera_line("IpConfigUtility v2.1 - scanning...").is_none());
        assert!(parse_camera_line("").is_none());
        assert!(parse_camera_line("Press Enter to exit.").is_none());
    }

    #[test]
    fn test_parse_camera_line_header_row() {
        // Header rows carry words where the addresses should be.
        let line = "[ID]  MAC               IP          Subnet       Gateway  Mode";
        assert!(parse_camera_line(line).is_none());
    }

    #[test]
    fn test_parse_camera_line_non_numeric_index() {
        let line = "[a] 00:30:53:2B:7F:31 172.16.1.2 255.255.0.0 0.0.0.0 Static";
        assert!(parse_camera_line(line).is_none());
    }

    #[test]
    fn test_parse_camera_list() {
        let output = "\
IpConfigUtility v2.1
Scanning network adapters...

[0]  00:30:53:2B:7F:31  172.16.1.2   255.255.0.0  0.0.0.0  Static
[1]  00:30:53:2B:80:0A  172.16.1.3   255.255.0.0  0.0.0.0  DHCP

Press Enter to exit.
";
        let cameras = parse_camera_list(output);
        assert_eq!(cameras.len(), 2);
        assert_eq!(cameras[0].mac, "00:30:53:2B:7F:31");
        assert_eq!(cameras[1].index, 1);
        assert_eq!(cameras[1].ip, "172.16.1.3");
    }

    #[test]
    fn test_parse_camera_list_empty_output() {
        assert!(parse_camera_list("").is_empty());
        assert!(parse_camera_list("No devices detected.\n").is_empty());
    }
}
