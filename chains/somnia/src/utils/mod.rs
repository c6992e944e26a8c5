pub mod random;

/// `0x1234...abcd` form used in log lines.
pub fn short_address(address: &ethers::types::Address) -> String {
    let full = format!("{:?}", address);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_address() {
        let address: ethers::types::Address = "0x7968ac15a72629e05f41b8271e4e7292e0cc9f90"
            .parse()
            .unwrap();
        assert_eq!(short_address(&address), "0x7968...9f90");
    }
}
