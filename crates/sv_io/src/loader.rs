//! Loader: read local JSON inputs (base data, optional params) and return
//! typed `sv_core` values. No network I/O.
//!
//! Wire format (camelCase):
//! `{ name?, committeeSize, groups: [{ name, seatsOrVotes }],
//!    unions: [{ name, unionType: "FRACTION" | "COMMITTEE", groups: [index] }] }`
//!
//! Shape problems the type system can't express (negative weights, negative
//! indices, negative committee size) are reported here with a pointer or a
//! `ConfigurationError`. Cross-reference checks (names, index ranges, fraction
//! overlap) belong to the pipeline.

#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use serde::Deserialize;
use sv_core::{
    entities::{BaseData, Group, Union, UnionType},
    errors::ConfigurationError,
    variables::Params,
};
use tracing::debug;

use crate::IoError;

// ----------------------------- Wire types -----------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BaseDataWire {
    #[serde(default)]
    name: Option<String>,
    committee_size: i64,
    #[serde(default)]
    groups: Vec<GroupWire>,
    #[serde(default)]
    unions: Vec<UnionWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupWire {
    name: String,
    seats_or_votes: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnionWire {
    name: String,
    union_type: UnionType,
    groups: Vec<i64>,
}

/// Base data as read from disk, with its optional display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseDataFile {
    pub name: Option<String>,
    pub data: BaseData,
}

// ----------------------------- Parsing -----------------------------

pub fn parse_base_data(json: &str) -> Result<BaseDataFile, IoError> {
    let wire: BaseDataWire = serde_json::from_str(json)?;

    let mut groups = Vec::with_capacity(wire.groups.len());
    for (i, g) in wire.groups.into_iter().enumerate() {
        let weight = u64::try_from(g.seats_or_votes).map_err(|_| IoError::Json {
            pointer: format!("/groups/{i}/seatsOrVotes"),
            msg: format!("must be a non-negative integer (got {})", g.seats_or_votes),
        })?;
        groups.push(Group::new(g.name, weight));
    }

    let mut unions = Vec::with_capacity(wire.unions.len());
    for u in wire.unions {
        let mut members = Vec::with_capacity(u.groups.len());
        for ix in u.groups {
            let ix = usize::try_from(ix)
                .map_err(|_| ConfigurationError::UnknownGroupIndex { union: u.name.clone(), index: ix })?;
            members.push(ix);
        }
        unions.push(Union { name: u.name, union_type: u.union_type, groups: members });
    }

    let data = BaseData::new(wire.committee_size, groups, unions)?;
    Ok(BaseDataFile { name: wire.name, data })
}

pub fn parse_params(json: &str) -> Result<Params, IoError> {
    let params: Params = serde_json::from_str(json)?;
    params.validate().map_err(IoError::Params)?;
    Ok(params)
}

// ----------------------------- File loaders -----------------------------

pub fn load_base_data(path: &Path) -> Result<BaseDataFile, IoError> {
    let text = read_text(path)?;
    let file = parse_base_data(&text)?;
    debug!(
        path = %path.display(),
        groups = file.data.groups.len(),
        unions = file.data.unions.len(),
        committee_size = file.data.committee_size,
        "loaded base data"
    );
    Ok(file)
}

pub fn load_params(path: &Path) -> Result<Params, IoError> {
    let params = parse_params(&read_text(path)?)?;
    debug!(path = %path.display(), methods = params.methods.len(), "loaded params");
    Ok(params)
}

fn read_text(path: &Path) -> Result<String, IoError> {
    fs::read_to_string(path).map_err(|source| IoError::Read { path: path.to_path_buf(), source })
}
