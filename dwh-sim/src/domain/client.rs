use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum Sector {
    Finance,
    Retail,
    Health,
    Technology,
    Education,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum ContractType {
    #[strum(serialize = "Fixed Price")]
    #[serde(rename = "Fixed Price")]
    FixedPrice,
    #[strum(serialize = "Time and Materials")]
    #[serde(rename = "Time and Materials")]
    TimeAndMaterials,
    Subscription,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub id: u32,
    pub name: String,
    pub sector: Sector,
    pub contract_type: ContractType,
}
