//! Contract wire shapes
//!
//! Mirrors the storage layout of the registry and logger contracts. Prices are
//! integer smallest units and schemas are plain strings on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::applet::{Applet, AppletId};
use crate::domain::price::{Price, PriceError};
use crate::dto::applet::NewApplet;

/// Envelope for a contract query or execute call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractCall {
    pub method: String,
    pub args: serde_json::Value,
}

/// Applet as stored by the registry contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractApplet {
    pub id: AppletId,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub owner: String,
    pub input_schema: String,
    pub output_schema: String,
    pub is_active: bool,
}

impl From<ContractApplet> for Applet {
    fn from(raw: ContractApplet) -> Self {
        Applet {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            price: Price::from_smallest_units(u128::from(raw.price)),
            input_schema: raw.input_schema.into(),
            output_schema: raw.output_schema.into(),
            owner: raw.owner,
            is_active: raw.is_active,
        }
    }
}

/// Arguments of the registry's `register_applet` method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterAppletArgs {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub input_schema: String,
    pub output_schema: String,
}

impl TryFrom<&NewApplet> for RegisterAppletArgs {
    type Error = PriceError;

    fn try_from(applet: &NewApplet) -> Result<Self, Self::Error> {
        Ok(Self {
            name: applet.name.clone(),
            description: applet.description.clone(),
            price: price_to_wire(applet.price)?,
            input_schema: applet.input_schema.to_string(),
            output_schema: applet.output_schema.to_string(),
        })
    }
}

/// Execution as stored by the logger contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractExecution {
    pub id: u32,
    pub user: String,
    pub applet_ids: Vec<AppletId>,
    pub total_price: u64,
    pub result_hash: String,
    pub timestamp: u64,
}

/// Arguments of the logger's `log_execution` method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogExecutionArgs {
    pub applet_ids: Vec<AppletId>,
    pub total_price: u64,
    pub result_hash: String,
}

/// Narrows a price to the contract's `u64` smallest-unit field
pub fn price_to_wire(price: Price) -> Result<u64, PriceError> {
    u64::try_from(price.smallest_units()).map_err(|_| PriceError::Overflow)
}
