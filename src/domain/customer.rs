#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerProfile {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub detail_address: String,
}
