//! Turns the `rgWsPublic2AfmMethodResponse` envelope into a [`NormalizedResult`].

use crate::errors::AppError;
use crate::models::{CompanyRecord, CompanySector, ErrorInfo, NormalizedResult};
use crate::xml_tree::{Scalar, XmlNode};

/// Path from `<env:Envelope>` down to the result record.
const RESULT_PATH: [&str; 4] = [
    "Body",
    "rgWsPublic2AfmMethodResponse",
    "result",
    "rg_ws_public2_result_rtType",
];

const SECTORS_KEY: &str = "sectors";

/// Normalizes a raw AADE response body.
///
/// Business errors come back as `has_errors = true`. Anything that is not
/// the expected envelope is an `AppError::MalformedResponse`.
pub fn normalize(xml: &str) -> Result<NormalizedResult, AppError> {
    let root = XmlNode::parse(xml)?;
    if root.name != "Envelope" {
        return Err(AppError::MalformedResponse(format!(
            "expected <Envelope> root, found <{}>",
            root.name
        )));
    }
    let record = root.descend(&RESULT_PATH)?;

    let call_seq_id = match record.require("call_seq_id")?.scalar() {
        Scalar::Text(text) => text.trim().to_string(),
        _ => {
            return Err(AppError::MalformedResponse(
                "call_seq_id is not a text value".to_string(),
            ))
        }
    };

    let errors_info = extract_error(record.require("error_rec")?)?;
    let has_errors = errors_info.code.is_some() || errors_info.descr.is_some();

    let data = if has_errors {
        tracing::debug!(
            "AADE reported error {:?} for call {}",
            errors_info.code,
            call_seq_id
        );
        None
    } else {
        Some(extract_company(record)?)
    };

    Ok(NormalizedResult {
        call_seq_id,
        has_errors,
        errors_info,
        search_info: None,
        data,
    })
}

fn extract_error(error_rec: &XmlNode) -> Result<ErrorInfo, AppError> {
    Ok(ErrorInfo {
        code: error_field(error_rec, "error_code")?,
        descr: error_field(error_rec, "error_descr")?,
    })
}

// An attributed element (xsi:nil) means "no error"; text is kept verbatim.
fn error_field(error_rec: &XmlNode, name: &str) -> Result<Option<String>, AppError> {
    match error_rec.require(name)?.scalar() {
        Scalar::Nil => Ok(None),
        Scalar::Text(text) => Ok(Some(text.to_string())),
        Scalar::Nested => Err(AppError::MalformedResponse(format!(
            "{} is not a text value",
            name
        ))),
    }
}

fn extract_company(record: &XmlNode) -> Result<CompanyRecord, AppError> {
    let basic_rec = record.require("basic_rec")?;

    let sectors = match record.child("firm_act_tab") {
        Some(tab) if !tab.has_attributes() => Some(
            tab.children_named("item")
                .map(|item| CompanySector {
                    fields: item.flatten(),
                })
                .collect::<Vec<_>>(),
        ),
        _ => None,
    };

    // `sectors` is reserved for the activity list in the flattened record
    let mut fields = basic_rec.flatten();
    if fields.remove(SECTORS_KEY).is_some() {
        tracing::warn!("Dropping basic_rec field '{}' (reserved name)", SECTORS_KEY);
    }

    Ok(CompanyRecord { fields, sectors })
}
