//! IP address helpers: validation, IP list files and reverse-DNS names.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::IpAddr;
use std::path::Path;

/// Errors from IP address conversion
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IpError {
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),
}

/// Check if a string is a valid IP address (IPv4 or IPv6)
pub fn is_ip(ip: &str) -> bool {
    ip.parse::<IpAddr>().is_ok()
}

/// Extract valid IP addresses from a list of strings
pub fn extract_valid_ips<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.as_ref())
        .filter(|ip| is_ip(ip))
        .map(str::to_string)
        .collect()
}

/// Read the IP addresses listed in a file.
///
/// Lines are trimmed; blank lines, `#` comments and `!` comments are
/// skipped, as is anything that does not parse as an address.
///
/// # Returns
/// * `Ok(None)` if `file_path` is not a regular file
/// * `Ok(Some(ips))` with the addresses in file order
/// * `Err` if the file cannot be read
pub fn read_ips_from_file(file_path: &Path) -> io::Result<Option<Vec<String>>> {
    if !file_path.is_file() {
        log::debug!("IP list {:?} is not a file", file_path);
        return Ok(None);
    }

    let reader = BufReader::new(File::open(file_path)?);
    let mut candidates = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        candidates.push(line.to_string());
    }

    let ips = extract_valid_ips(&candidates);
    if ips.len() < candidates.len() {
        log::debug!(
            "Skipped {} non-IP line(s) in {:?}",
            candidates.len() - ips.len(),
            file_path
        );
    }

    Ok(Some(ips))
}

/// Build the reverse-DNS (PTR) name of an address, with trailing dot.
///
/// # Examples
/// ```
/// use libbart::utils::ip_utils::reverse_pointer;
///
/// assert_eq!(reverse_pointer("192.0.2.10").unwrap(), "10.2.0.192.in-addr.arpa.");
/// assert!(reverse_pointer("not-an-ip").is_err());
/// ```
pub fn reverse_pointer(ip: &str) -> Result<String, IpError> {
    let addr = ip
        .trim()
        .parse::<IpAddr>()
        .map_err(|_| IpError::InvalidAddress(ip.to_string()))?;

    match addr {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            Ok(format!(
                "{}.{}.{}.{}.in-addr.arpa.",
                octets[3], octets[2], octets[1], octets[0]
            ))
        }
        IpAddr::V6(ipv6) => {
            let mut name = String::with_capacity(73);
            for byte in ipv6.octets().iter().rev() {
                // Low nibble first since the whole address is reversed
                name.push_str(&format!("{:x}.{:x}.", byte & 0x0f, byte >> 4));
            }
            name.push_str("ip6.arpa.");
            Ok(name)
        }
    }
}

/// Convert a list of addresses to their PTR names
pub fn atoptr<S: AsRef<str>>(ips: &[S]) -> Result<Vec<String>, IpError> {
    ips.iter().map(|ip| reverse_pointer(ip.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_ip() {
        assert!(is_ip("1.2.3.4"));
        assert!(is_ip("2002::6"));
        assert!(!is_ip("1.2.3"));
        assert!(!is_ip("256.1.1.1"));
        assert!(!is_ip(""));
        assert!(!is_ip("hostname"));
    }

    #[test]
    fn test_extract_valid_ips() {
        let values = vec!["1.1.1.1".to_string(), "nope".to_string(), "fe80::1".to_string()];
        assert_eq!(extract_valid_ips(&values), vec!["1.1.1.1", "fe80::1"]);
    }

    #[test]
    fn test_read_ips_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "# management hosts\n1.2.3.4\n\n! old core\n   1.1.1.1  \nnot-an-ip\n238.39.39.39\n"
        )
        .unwrap();

        let ips = read_ips_from_file(file.path()).unwrap().unwrap();
        assert_eq!(ips, vec!["1.2.3.4", "1.1.1.1", "238.39.39.39"]);
    }

    #[test]
    fn test_read_ips_keeps_both_families_in_order() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "fe80::1\n10.0.0.1%eth0\n10.0.0.1\n2001:db8::/32\n::1\n").unwrap();

        let ips = read_ips_from_file(file.path()).unwrap().unwrap();
        assert_eq!(ips, vec!["fe80::1", "10.0.0.1", "::1"]);
    }

    #[test]
    fn test_read_ips_missing_file() {
        let result = read_ips_from_file(Path::new("/definitely/not/here.txt")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_reverse_pointer_v4() {
        assert_eq!(reverse_pointer("1.2.3.4").unwrap(), "4.3.2.1.in-addr.arpa.");
    }

    #[test]
    fn test_reverse_pointer_v6() {
        assert_eq!(
            reverse_pointer("2001:db8::567:89ab").unwrap(),
            "b.a.9.8.7.6.5.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa."
        );
    }

    #[test]
    fn test_atoptr() {
        let ptrs = atoptr(&["10.0.0.1", "::1"]).unwrap();
        assert_eq!(ptrs[0], "1.0.0.10.in-addr.arpa.");
        assert!(ptrs[1].starts_with("1.0.0.0."));
        assert!(ptrs[1].ends_with(".ip6.arpa."));

        assert_eq!(
            atoptr(&["10.0.0.1", "bogus"]),
            Err(IpError::InvalidAddress("bogus".to_string()))
        );
    }
}
