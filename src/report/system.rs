//! Parsing of local OS utility output into the `System Info` section

use tracing::{debug, warn};

use super::{Section, StatusEntry, Severity, Thresholds};
use crate::error::{Result, StatuserError};

/// Numeric UTC offset; chrono has no zone abbreviation for `Local`
pub const TIME_FORMAT: &str = "%d %b %y %H:%M:%S %z";

/// One row of `df -hP`
#[derive(Debug, Clone, PartialEq)]
pub struct DiskUsage {
    pub mount: String,
    /// The `Capacity` column as printed, e.g. `42%`
    pub use_percent: String,
}

impl DiskUsage {
    pub fn percent(&self) -> Option<f64> {
        self.use_percent.trim_end_matches('%').parse().ok()
    }
}

/// Totals and used amounts (MiB) from `free -m`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryUsage {
    pub mem_total: f64,
    pub mem_used: f64,
    pub swap_total: f64,
    pub swap_used: f64,
}

impl MemoryUsage {
    pub fn memory_percent(&self) -> f64 {
        round_tenth(self.mem_used / self.mem_total * 100.0)
    }

    /// `None` when the host has no swap configured
    pub fn swap_percent(&self) -> Option<f64> {
        if self.swap_total == 0.0 {
            return None;
        }
        Some(round_tenth(self.swap_used / self.swap_total * 100.0))
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Human uptime from `uptime`, e.g. `3 days` or `4:05`
pub fn parse_uptime(raw: &str) -> String {
    let raw = raw.trim_end();
    let since = raw.rsplit("up ").next().unwrap_or(raw);
    since.split(",  ").next().unwrap_or(since).trim().to_string()
}

/// `lsb_release -s -d` quotes its answer on some distributions
pub fn parse_release(raw: &str) -> String {
    raw.trim().trim_matches('"').to_string()
}

/// First field of `/proc/loadavg`
pub fn parse_load_average(raw: &str) -> Result<f64> {
    raw.split_whitespace()
        .next()
        .and_then(|field| field.parse().ok())
        .ok_or_else(|| StatuserError::parse("load average", raw))
}

/// Rows of `df -hP`, header skipped
pub fn parse_disk_usage(raw: &str) -> Vec<DiskUsage> {
    raw.lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 6 {
                return None;
            }
            Some(DiskUsage {
                mount: fields[fields.len() - 1].to_string(),
                use_percent: fields[4].to_string(),
            })
        })
        .collect()
}

/// `Mem:` and `Swap:` rows of `free -m`; a missing swap row reads as no swap
pub fn parse_memory_usage(raw: &str) -> Result<MemoryUsage> {
    let mut mem = None;
    let mut swap = (0.0, 0.0);

    for line in raw.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let totals = || -> Option<(f64, f64)> {
            Some((fields.get(1)?.parse().ok()?, fields.get(2)?.parse().ok()?))
        };
        match fields.first() {
            Some(&"Mem:") => mem = totals(),
            Some(&"Swap:") => {
                swap = totals().ok_or_else(|| StatuserError::parse("swap usage", line))?;
            }
            _ => {}
        }
    }

    let (mem_total, mem_used) = mem.ok_or_else(|| StatuserError::parse("memory usage", raw))?;
    if mem_total <= 0.0 {
        return Err(StatuserError::parse("memory usage", raw));
    }

    Ok(MemoryUsage {
        mem_total,
        mem_used,
        swap_total: swap.0,
        swap_used: swap.1,
    })
}

/// Number of sessions listed by `users`
pub fn parse_user_count(raw: &str) -> usize {
    raw.split_whitespace().count()
}

/// Raw readings gathered from the host, ready to classify
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    pub time: String,
    pub uptime: String,
    pub release: String,
    pub kernel: String,
    pub environment: String,
    pub load: f64,
    pub disks: Vec<DiskUsage>,
    pub memory: MemoryUsage,
    pub users: usize,
}

/// Thresholds and mounts applied when building the section
#[derive(Debug, Clone)]
pub struct SystemRules<'a> {
    pub usage: Thresholds,
    pub load: Thresholds,
    pub secondary_mount: Option<&'a str>,
}

fn disk_entry(disks: &[DiskUsage], mount: &str, usage: &Thresholds) -> Option<StatusEntry> {
    let Some(disk) = disks.iter().find(|d| d.mount == mount) else {
        debug!(mount, "mount point not reported by df");
        return None;
    };
    let Some(percent) = disk.percent() else {
        warn!(mount, value = %disk.use_percent, "unreadable disk usage");
        return None;
    };
    Some(StatusEntry::new(
        format!("Usage of {mount}"),
        usage.classify(percent),
        disk.use_percent.clone(),
    ))
}

impl SystemSnapshot {
    pub fn into_section(self, rules: &SystemRules<'_>) -> Section {
        let mut section = Section::new("System Info");

        section.push(StatusEntry::new("Time", Severity::Good, self.time));
        section.push(StatusEntry::new("Uptime", Severity::Good, self.uptime));
        section.push(StatusEntry::new("Release", Severity::Good, self.release));
        section.push(StatusEntry::new("Kernel", Severity::Good, self.kernel));
        section.push(StatusEntry::new(
            "Environment",
            Severity::Good,
            self.environment,
        ));

        section.push(StatusEntry::new(
            "Load (1 min)",
            rules.load.classify(self.load),
            format!("{:?}", self.load),
        ));

        section.extend(disk_entry(&self.disks, "/", &rules.usage));
        if let Some(mount) = rules.secondary_mount {
            section.extend(disk_entry(&self.disks, mount, &rules.usage));
        }

        let memory = self.memory.memory_percent();
        section.push(StatusEntry::new(
            "Memory usage",
            rules.usage.classify(memory),
            format!("{memory:.1}%"),
        ));

        if let Some(swap) = self.memory.swap_percent() {
            section.push(StatusEntry::new(
                "Swap usage",
                rules.usage.classify(swap),
                format!("{swap:.1}%"),
            ));
        }

        section.push(StatusEntry::new(
            "Users",
            Severity::Good,
            self.users.to_string(),
        ));

        section
    }
}
