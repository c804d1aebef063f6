//! SOAP envelope for the `rgWsPublic2AfmMethod` operation.

use crate::errors::AppError;
use crate::models::SearchRequest;
use html_escape::encode_text;

const ENVELOPE_OPEN: &str = r#"<env:Envelope xmlns:env="http://www.w3.org/2003/05/soap-envelope" xmlns:ns1="http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd" xmlns:ns2="http://rgwspublic2/RgWsPublic2Service" xmlns:ns3="http://rgwspublic2/RgWsPublic2">"#;

/// Checks the inputs the envelope cannot do without.
pub fn validate(request: &SearchRequest) -> Result<(), AppError> {
    if request.target_id.trim().is_empty() {
        return Err(AppError::Validation(
            "a VATID is required for the publicity search".to_string(),
        ));
    }
    if request.credentials.username.trim().is_empty()
        || request.credentials.password.trim().is_empty()
    {
        return Err(AppError::Validation(
            "AADE publicity username and password are required".to_string(),
        ));
    }

    check_xml_chars("target VATID", &request.target_id)?;
    if let Some(requester) = request.effective_requester() {
        check_xml_chars("requester VATID", requester)?;
    }
    check_xml_chars("username", &request.credentials.username)?;
    check_xml_chars("password", &request.credentials.password)?;
    Ok(())
}

// Escaping cannot help with characters XML 1.0 forbids outright.
fn check_xml_chars(field: &str, value: &str) -> Result<(), AppError> {
    let allowed = |c: char| {
        matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
    };
    match value.chars().find(|c| !allowed(*c)) {
        Some(c) => Err(AppError::Validation(format!(
            "{} contains a character not allowed in XML: {:?}",
            field, c
        ))),
        None => Ok(()),
    }
}

/// Builds the request envelope.
///
/// All substituted values are XML-escaped. Without a requester the
/// `afm_called_by` element is sent empty.
pub fn build_envelope(request: &SearchRequest) -> Result<String, AppError> {
    validate(request)?;

    let called_by = match request.effective_requester() {
        Some(requester) => format!(
            "<ns3:afm_called_by>{}</ns3:afm_called_by>",
            encode_text(requester)
        ),
        None => "<ns3:afm_called_by/>".to_string(),
    };

    Ok(format!(
        "{open}\r\n\
         \x20  <env:Header>\r\n\
         \x20     <ns1:Security>\r\n\
         \x20        <ns1:UsernameToken>\r\n\
         \x20           <ns1:Username>{username}</ns1:Username>\r\n\
         \x20           <ns1:Password>{password}</ns1:Password>\r\n\
         \x20        </ns1:UsernameToken>\r\n\
         \x20     </ns1:Security>\r\n\
         \x20  </env:Header>\r\n\
         \x20  <env:Body>\r\n\
         \x20     <ns2:rgWsPublic2AfmMethod>\r\n\
         \x20        <ns2:INPUT_REC>\r\n\
         \x20           {called_by}\r\n\
         \x20           <ns3:afm_called_for>{target}</ns3:afm_called_for>\r\n\
         \x20        </ns2:INPUT_REC>\r\n\
         \x20     </ns2:rgWsPublic2AfmMethod>\r\n\
         \x20  </env:Body>\r\n\
         </env:Envelope>",
        open = ENVELOPE_OPEN,
        username = encode_text(&request.credentials.username),
        password = encode_text(&request.credentials.password),
        called_by = called_by,
        target = encode_text(request.effective_target()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Credentials;
    use crate::xml_tree::{Scalar, XmlNode};

    fn request(target: &str) -> SearchRequest {
        SearchRequest::new(target, Credentials::new("user", "pass"))
    }

    #[test]
    fn test_envelope_without_requester() {
        let xml = build_envelope(&request("094014201")).unwrap();

        assert!(xml.contains("<ns3:afm_called_by/>"));
        assert!(!xml.contains("<ns3:afm_called_by>"));
        assert!(xml.contains("<ns3:afm_called_for>094014201</ns3:afm_called_for>"));
        assert!(xml.contains("<ns1:Username>user</ns1:Username>"));
        assert!(xml.contains("<ns1:Password>pass</ns1:Password>"));
    }

    #[test]
    fn test_envelope_with_requester() {
        let xml = build_envelope(&request("094014201").with_requester("123456789")).unwrap();

        assert!(xml.contains("<ns3:afm_called_by>123456789</ns3:afm_called_by>"));
        assert!(!xml.contains("<ns3:afm_called_by/>"));
    }

    #[test]
    fn test_envelope_is_well_formed() {
        let xml = build_envelope(&request("094014201").with_requester("123456789")).unwrap();
        let root = XmlNode::parse(&xml).unwrap();

        assert_eq!(root.name, "Envelope");
        let input = root
            .descend(&["Body", "rgWsPublic2AfmMethod", "INPUT_REC"])
            .unwrap();
        assert_eq!(
            input.require("afm_called_for").unwrap().scalar(),
            Scalar::Text("094014201")
        );
        assert_eq!(
            input.require("afm_called_by").unwrap().scalar(),
            Scalar::Text("123456789")
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let req = SearchRequest::new(
            "1</ns3:afm_called_for><x>",
            Credentials::new("a&b", "<pw>"),
        );
        let xml = build_envelope(&req).unwrap();

        assert!(xml.contains("<ns1:Username>a&amp;b</ns1:Username>"));
        assert!(xml.contains("<ns1:Password>&lt;pw&gt;</ns1:Password>"));
        let root = XmlNode::parse(&xml).unwrap();
        let target = root
            .descend(&["Body", "rgWsPublic2AfmMethod", "INPUT_REC", "afm_called_for"])
            .unwrap();
        assert_eq!(target.scalar(), Scalar::Text("1</ns3:afm_called_for><x>"));
    }

    #[test]
    fn test_target_is_trimmed() {
        let xml = build_envelope(&request("  094014201 ")).unwrap();
        assert!(xml.contains("<ns3:afm_called_for>094014201</ns3:afm_called_for>"));
    }

    #[test]
    fn test_control_characters_rejected() {
        let err = build_envelope(&request("0940\u{1}14201")).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("target VATID"));

        let err = build_envelope(&request("094014201").with_requester("1\u{1b}2")).unwrap_err();
        assert!(err.to_string().contains("requester VATID"));

        let bad_pass = SearchRequest::new("094014201", Credentials::new("user", "p\u{0}w"));
        assert!(build_envelope(&bad_pass).unwrap_err().is_validation());

        let bad_user = SearchRequest::new("094014201", Credentials::new("u\u{FFFE}", "pass"));
        assert!(build_envelope(&bad_user).unwrap_err().is_validation());

        // Tab, LF and CR are legal XML
        let ok = SearchRequest::new("094014201", Credentials::new("user", "p\tw\r\nx"));
        assert!(build_envelope(&ok).is_ok());
    }

    #[test]
    fn test_validation_failures() {
        assert!(build_envelope(&request("")).unwrap_err().is_validation());
        assert!(build_envelope(&request("   ")).unwrap_err().is_validation());

        let no_user = SearchRequest::new("094014201", Credentials::new("", "pass"));
        assert!(build_envelope(&no_user).unwrap_err().is_validation());

        let no_pass = SearchRequest::new("094014201", Credentials::new("user", ""));
        assert!(build_envelope(&no_pass).unwrap_err().is_validation());
    }
}
