//! Namesilo XML envelopes
//!
//! Declarative serde schema for the two replies nsddns consumes. Every field
//! names the XML element it is read from.
//!
//! ```xml
//! <namesilo>
//!   <request><operation>dnsListRecords</operation><ip>203.0.113.7</ip></request>
//!   <reply>
//!     <code>300</code>
//!     <detail>success</detail>
//!     <resource_record>
//!       <record_id>1a2b3c</record_id>
//!       <type>A</type>
//!       <host>home.example.com</host>
//!       <value>203.0.113.7</value>
//!       <ttl>7207</ttl>
//!       <distance>0</distance>
//!     </resource_record>
//!   </reply>
//! </namesilo>
//! ```
//!
//! Status is decoded through [`StatusEnvelope`] first so a failed reply is
//! reported as such even when the rest of its payload would not decode.

use nsddns_core::{Error, ResourceRecord, Result};
use serde::Deserialize;

/// Reply code Namesilo uses for success on every operation
pub const SUCCESS_CODE: u32 = 300;

/// `<reply>` status shared by every operation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiReply {
    #[serde(rename = "code")]
    pub code: u32,
    #[serde(rename = "detail", default)]
    pub detail: String,
}

impl ApiReply {
    /// Fail with the registrar's own detail text unless the code is 300
    pub fn ensure_success(&self) -> Result<()> {
        if self.code == SUCCESS_CODE {
            Ok(())
        } else {
            Err(Error::api(self.detail.clone()))
        }
    }
}

/// `<request>` echo; Namesilo reports the operation and the caller's address
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequestEcho {
    #[serde(rename = "operation", default)]
    pub operation: String,
    #[serde(rename = "ip", default)]
    pub ip: String,
}

/// Any `<namesilo>` document, reading nothing but the reply status
#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    #[serde(rename = "reply")]
    reply: ApiReply,
}

/// `<resource_record>` element
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRecordXml {
    #[serde(rename = "record_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(rename = "host")]
    pub host: String,
    #[serde(rename = "value", default)]
    pub value: String,
    #[serde(rename = "ttl", default)]
    pub ttl: u32,
    #[serde(rename = "distance", default)]
    pub distance: u32,
}

impl From<ResourceRecordXml> for ResourceRecord {
    fn from(rr: ResourceRecordXml) -> Self {
        Self {
            id: rr.id,
            record_type: rr.record_type,
            host: rr.host,
            value: rr.value,
            ttl: rr.ttl,
            distance: rr.distance,
        }
    }
}

/// `<reply>` of `dnsListRecords`
#[derive(Debug, Clone, Deserialize)]
pub struct ListRecordsReply {
    #[serde(rename = "code")]
    pub code: u32,
    #[serde(rename = "detail", default)]
    pub detail: String,
    #[serde(rename = "resource_record", default)]
    pub resource_records: Vec<ResourceRecordXml>,
}

/// `dnsListRecords` response document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "namesilo")]
pub struct ListRecordsResponse {
    #[serde(rename = "request", default)]
    pub request: RequestEcho,
    #[serde(rename = "reply")]
    pub reply: ListRecordsReply,
}

/// `<reply>` of `dnsUpdateRecord`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRecordReply {
    #[serde(rename = "code")]
    pub code: u32,
    #[serde(rename = "detail", default)]
    pub detail: String,
    #[serde(rename = "record_id", default)]
    pub record_id: String,
}

/// `dnsUpdateRecord` response document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "namesilo")]
pub struct UpdateRecordResponse {
    #[serde(rename = "request", default)]
    pub request: RequestEcho,
    #[serde(rename = "reply")]
    pub reply: UpdateRecordReply,
}

/// Decode and validate the reply status of any Namesilo document
pub fn parse_status(xml: &str) -> Result<ApiReply> {
    let envelope: StatusEnvelope = quick_xml::de::from_str(xml)
        .map_err(|e| Error::parse(format!("Failed to parse Namesilo reply status: {}", e)))?;
    envelope.reply.ensure_success()?;
    Ok(envelope.reply)
}

/// Decode a `dnsListRecords` response into its records, in document order
pub fn parse_list_records(xml: &str) -> Result<Vec<ResourceRecord>> {
    parse_status(xml)?;

    let response: ListRecordsResponse = quick_xml::de::from_str(xml)
        .map_err(|e| Error::parse(format!("Failed to parse dnsListRecords response: {}", e)))?;

    tracing::debug!(
        "{} returned {} record(s) (caller ip: {})",
        response.request.operation,
        response.reply.resource_records.len(),
        response.request.ip
    );

    Ok(response
        .reply
        .resource_records
        .into_iter()
        .map(ResourceRecord::from)
        .collect())
}

/// Decode a `dnsUpdateRecord` response into the newly assigned record ID
pub fn parse_update_record(xml: &str) -> Result<String> {
    parse_status(xml)?;

    let response: UpdateRecordResponse = quick_xml::de::from_str(xml)
        .map_err(|e| Error::parse(format!("Failed to parse dnsUpdateRecord response: {}", e)))?;

    let record_id = response.reply.record_id.trim();
    if record_id.is_empty() {
        return Err(Error::parse("dnsUpdateRecord reply has no record_id"));
    }

    Ok(record_id.to_string())
}
