//! Interactive IP assignment flow.
//!
//! Walks the detected camera list, prompting for a new IPv4 address per
//! camera and applying it through the vendor utility's force/persist pair.
//! The reader and writer are injected so the prompt loop can be tested
//! without a terminal.

use std::io::{BufRead, Write};
use std::net::Ipv4Addr;

use crate::cameras::Camera;
use crate::utility::{Assignment, IpConfigUtility};

/// Outcome of one assignment run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AssignReport {
    pub applied: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Input ended before every camera was handled.
    pub aborted: bool,
}

impl AssignReport {
    /// Number of cameras for which an apply was actually attempted.
    pub fn attempted(&self) -> usize {
        self.applied + self.failed
    }

    /// Every attempted apply failed. Skipped cameras do not count as
    /// attempts, so an all-skipped run is not a failure.
    pub fn all_failed(&self) -> bool {
        self.attempted() > 0 && self.applied == 0
    }
}

/// Result of prompting for a single camera.
enum PromptResult {
    Ip(Ipv4Addr),
    Skip,
    Eof,
}

/// Prompt for a new IP until the input parses, is blank (skip), or ends.
fn prompt_ip<R: BufRead, W: Write>(
    mac: &str,
    input: &mut R,
    out: &mut W,
) -> std::io::Result<PromptResult> {
    loop {
        write!(out, "Enter new IP for camera with MAC {} (blank to skip): ", mac)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(PromptResult::Eof);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(PromptResult::Skip);
        }

        match trimmed.parse::<Ipv4Addr>() {
            Ok(ip) => return Ok(PromptResult::Ip(ip)),
            Err(_) => {
                writeln!(out, "Invalid IP address format. Please try again.")?;
            }
        }
    }
}

/// Interactively assign new IP addresses to all detected cameras.
///
/// Defaults for subnet and gateway come from the caller (CLI flag or config
/// file). A per-camera apply failure is reported and the loop continues with
/// the next camera.
pub fn assign_all<R: BufRead, W: Write>(
    utility: &IpConfigUtility,
    cameras: &[Camera],
    subnet: &str,
    gateway: &str,
    input: &mut R,
    out: &mut W,
) -> std::io::Result<AssignReport> {
    let mut report = AssignReport::default();

    if cameras.is_empty() {
        writeln!(out, "No cameras found.")?;
        return Ok(report);
    }

    writeln!(out, "Detected Cameras:")?;
    for camera in cameras {
        writeln!(
            out,
            "  MAC: {}, Current IP: {}, Subnet: {}, Gateway: {}",
            camera.mac, camera.ip, camera.subnet, camera.gateway
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Enter new IP addresses for the cameras.")?;

    for (i, camera) in cameras.iter().enumerate() {
        match prompt_ip(&camera.mac, input, out)? {
            PromptResult::Ip(ip) => {
                let assignment = Assignment {
                    mac: camera.mac.clone(),
                    ip: ip.to_string(),
                    subnet: subnet.to_string(),
                    gateway: gateway.to_string(),
                };
                match utility.apply(&assignment) {
                    Ok(()) => {
                        writeln!(
                            out,
                            "Successfully applied IP {} to camera with MAC {}.",
                            assignment.ip, assignment.mac
                        )?;
                        report.applied += 1;
                    }
                    Err(e) => {
                        writeln!(
                            out,
                            "Failed to apply IP {} to camera with MAC {}: {}",
                            assignment.ip, assignment.mac, e
                        )?;
                        report.failed += 1;
                    }
                }
            }
            PromptResult::Skip => {
                writeln!(out, "Skipped camera with MAC {}.", camera.mac)?;
                report.skipped += 1;
            }
            PromptResult::Eof => {
                writeln!(out)?;
                writeln!(out, "Input closed. Aborting remaining assignments.")?;
                report.skipped += cameras.len() - i;
                report.aborted = true;
                break;
            }
        }
    }

    writeln!(
        out,
        "\nDone: {} applied, {} failed, {} skipped.",
        report.applied, report.failed, report.skipped
    )?;

    Ok(report)
}
