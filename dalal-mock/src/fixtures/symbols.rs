/// Raw exchange listing, unsorted and with the quirks of the real file.
pub const LISTING: &[&str] = &[
    "TCS",
    "RELIANCE",
    "INFY",
    "M&M",
    "BAJAJ-AUTO",
    "HDFCBANK",
    "TCS",
    "NIFTYBEES-LONGNAME",
];
