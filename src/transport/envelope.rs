use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use crate::domain::ErrorCode;

/// XML namespace of the VoicePulse Connect! service operations.
pub const TARGET_NAMESPACE: &str = "http://connect.voicepulse.com/";

const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Wrapper element of the repeated records inside `<items>`.
pub const ITEM: &str = "ApiResponseItem";

const ITEMS: &str = "items";
const ERROR_CODE: &str = "errorCode";
const ERROR_MESSAGE: &str = "errorMessage";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid XML response: {message}")]
    Xml { message: String },

    #[error("{operation} response is missing the {field} field")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },

    #[error("SOAP fault: {fault_string}")]
    Fault {
        fault_code: Option<String>,
        fault_string: String,
    },
}

pub(super) fn xml_err(err: impl std::fmt::Display) -> TransportError {
    TransportError::Xml {
        message: err.to_string(),
    }
}

/// Build the SOAP 1.1 request envelope for `operation`.
///
/// Parameter values are XML-escaped; parameter names are trusted wire
/// constants.
pub fn build_envelope(operation: &str, params: &[(&str, String)]) -> String {
    let mut body = String::with_capacity(256);
    body.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    body.push_str(r#"<soap:Envelope xmlns:soap=""#);
    body.push_str(SOAP_ENVELOPE_NS);
    body.push_str(r#""><soap:Body><"#);
    body.push_str(operation);
    body.push_str(r#" xmlns=""#);
    body.push_str(TARGET_NAMESPACE);
    body.push_str(r#"">"#);
    for (name, value) in params {
        body.push('<');
        body.push_str(name);
        body.push('>');
        body.push_str(&escape(value.as_str()));
        body.push_str("</");
        body.push_str(name);
        body.push('>');
    }
    body.push_str("</");
    body.push_str(operation);
    body.push_str("></soap:Body></soap:Envelope>");
    body
}

/// Quoted `SOAPAction` header value for `operation`, as ASMX services expect.
pub fn soap_action(operation: &str) -> String {
    format!("\"{TARGET_NAMESPACE}{operation}\"")
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Lightweight element tree decoded from a response document.
///
/// Names are local names; namespace prefixes vary by server and carry no
/// information the client needs.
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
    text: String,
}

impl XmlNode {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed character content directly inside this element.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All direct children with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// All direct children in document order.
    pub fn children(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter()
    }

    /// Depth-first search for the first descendant with the given local name.
    pub fn descendant(&self, name: &str) -> Option<&XmlNode> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// Like [`XmlNode::child`], but a miss is a [`TransportError::MissingField`].
    pub fn required_text(
        &self,
        operation: &'static str,
        field: &'static str,
    ) -> Result<String, TransportError> {
        self.child(field)
            .map(|node| node.text().to_owned())
            .ok_or(TransportError::MissingField { operation, field })
    }
}

/// Parse a whole XML document into an [`XmlNode`] tree under a synthetic root.
pub fn parse_document(input: &str) -> Result<XmlNode, TransportError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut root = XmlNode::new("#document");
    let mut stack: Vec<XmlNode> = Vec::new();

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(start) => stack.push(node_from_start(&start)?),
            Event::Empty(start) => {
                let node = node_from_start(&start)?;
                attach(&mut stack, &mut root, node);
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| TransportError::Xml {
                    message: "unbalanced closing tag".to_owned(),
                })?;
                attach(&mut stack, &mut root, node);
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(xml_err)?;
                append_text(&mut stack, &value);
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data).into_owned();
                append_text(&mut stack, &value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(TransportError::Xml {
            message: "unclosed element".to_owned(),
        });
    }
    Ok(root)
}

fn node_from_start(start: &BytesStart<'_>) -> Result<XmlNode, TransportError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut node = XmlNode::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(xml_err)?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(xml_err)?.into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn attach(stack: &mut [XmlNode], root: &mut XmlNode, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.children.push(node),
    }
}

fn append_text(stack: &mut [XmlNode], value: &str) {
    if let Some(node) = stack.last_mut() {
        node.text.push_str(value);
    }
}

/// Surface a `<soap:Fault>` in the body as a [`TransportError::Fault`].
pub(super) fn check_fault(document: &XmlNode) -> Result<(), TransportError> {
    if let Some(fault) = document.descendant("Fault") {
        return Err(TransportError::Fault {
            fault_code: fault
                .child("faultcode")
                .map(|node| node.text().to_owned())
                .filter(|code| !code.is_empty()),
            fault_string: fault
                .child("faultstring")
                .map(|node| node.text().to_owned())
                .unwrap_or_default(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Remote failure extracted from a result envelope (`errorCode != "0"`).
pub struct RemoteFailure {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded operation result: either the typed payload or the provider's
/// failure, never both through one channel.
pub enum Outcome<T> {
    Success(T),
    Failure(RemoteFailure),
}

#[derive(Debug, Clone)]
/// The `<{Operation}Result>` element with its error envelope pre-extracted.
pub struct SoapResult {
    error_code: ErrorCode,
    error_message: Option<String>,
    node: XmlNode,
}

impl SoapResult {
    /// Locate and unwrap the result element for `operation`.
    ///
    /// Every VoicePulse result carries `errorCode`; a result element without
    /// one violates the contract.
    pub fn parse(operation: &'static str, body: &str) -> Result<Self, TransportError> {
        let document = parse_document(body)?;
        check_fault(&document)?;

        let wrapper = format!("{operation}Result");
        let node = document.descendant(&wrapper).cloned().ok_or(
            TransportError::MissingField {
                operation,
                field: "Result",
            },
        )?;

        let error_code = node
            .child(ERROR_CODE)
            .map(|code| ErrorCode::new(code.text()))
            .ok_or(TransportError::MissingField {
                operation,
                field: ERROR_CODE,
            })?;
        let error_message = node
            .child(ERROR_MESSAGE)
            .map(|message| message.text().to_owned())
            .filter(|message| !message.is_empty());

        Ok(Self {
            error_code,
            error_message,
            node,
        })
    }

    /// The provider's failure, if the envelope carries a non-success code.
    pub fn failure(&self) -> Option<RemoteFailure> {
        if self.error_code.is_success() {
            return None;
        }
        Some(RemoteFailure {
            code: self.error_code.clone(),
            message: self.error_message.clone().unwrap_or_default(),
        })
    }

    /// Repeated records under `<items>`. Absent or empty `<items>` yields an
    /// empty iterator; single-item operations must check emptiness themselves.
    pub fn items(&self) -> impl Iterator<Item = &XmlNode> {
        self.node
            .child(ITEMS)
            .into_iter()
            .flat_map(|items| items.children_named(ITEM))
    }

    /// Required scalar payload field directly inside the result element.
    pub fn required_text(
        &self,
        operation: &'static str,
        field: &'static str,
    ) -> Result<String, TransportError> {
        self.node.required_text(operation, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_envelope_wraps_and_escapes_params() {
        let body = build_envelope(
            "GetFlexRate",
            &[
                ("ApiKey", "k<&>".to_owned()),
                ("PhoneNumber", "12015551234".to_owned()),
            ],
        );
        assert!(body.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(body.contains(r#"<GetFlexRate xmlns="http://connect.voicepulse.com/">"#));
        assert!(body.contains("<ApiKey>k&lt;&amp;&gt;</ApiKey>"));
        assert!(body.contains("<PhoneNumber>12015551234</PhoneNumber>"));
        assert!(body.ends_with("</GetFlexRate></soap:Body></soap:Envelope>"));
    }

    #[test]
    fn soap_action_is_quoted_namespace_plus_operation() {
        assert_eq!(
            soap_action("GetBalance"),
            "\"http://connect.voicepulse.com/GetBalance\""
        );
    }

    #[test]
    fn parse_document_builds_tree_ignoring_prefixes() {
        let body = r#"<?xml version="1.0"?>
            <soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
              <soap:Body>
                <GetBalanceResponse xmlns="http://connect.voicepulse.com/">
                  <GetBalanceResult>
                    <errorCode>0</errorCode>
                    <errorMessage/>
                    <balance>25.00</balance>
                  </GetBalanceResult>
                </GetBalanceResponse>
              </soap:Body>
            </soap:Envelope>"#;
        let document = parse_document(body).unwrap();
        let result = document.descendant("GetBalanceResult").unwrap();
        assert_eq!(result.child("balance").unwrap().text(), "25.00");
        assert_eq!(result.child("errorCode").unwrap().text(), "0");
        assert_eq!(result.child("errorMessage").unwrap().text(), "");
    }

    #[test]
    fn parse_document_unescapes_text_and_keeps_attributes() {
        let body = r#"<root><item kind="a &amp; b">one &amp; two</item></root>"#;
        let document = parse_document(body).unwrap();
        let item = document.descendant("item").unwrap();
        assert_eq!(item.text(), "one & two");
        assert_eq!(item.attribute("kind"), Some("a & b"));
    }

    #[test]
    fn parse_document_rejects_malformed_input() {
        assert!(matches!(
            parse_document("<a><b></a>"),
            Err(TransportError::Xml { .. })
        ));
        assert!(matches!(
            parse_document("<unclosed>"),
            Err(TransportError::Xml { .. })
        ));
    }

    #[test]
    fn soap_result_extracts_error_envelope() {
        let body = r#"<Envelope><Body><GetBalanceResponse><GetBalanceResult>
            <errorCode>5</errorCode>
            <errorMessage>Invalid API Key</errorMessage>
        </GetBalanceResult></GetBalanceResponse></Body></Envelope>"#;
        let result = SoapResult::parse("GetBalance", body).unwrap();
        let failure = result.failure().unwrap();
        assert_eq!(failure.code.as_str(), "5");
        assert_eq!(failure.message, "Invalid API Key");
    }

    #[test]
    fn soap_result_requires_error_code() {
        let body = "<Envelope><Body><GetBalanceResponse><GetBalanceResult>\
                    <balance>25.00</balance>\
                    </GetBalanceResult></GetBalanceResponse></Body></Envelope>";
        let err = SoapResult::parse("GetBalance", body).unwrap_err();
        assert!(matches!(
            err,
            TransportError::MissingField {
                operation: "GetBalance",
                field: "errorCode"
            }
        ));
    }

    #[test]
    fn soap_result_requires_result_wrapper() {
        let body = "<Envelope><Body><SomethingElse/></Body></Envelope>";
        let err = SoapResult::parse("GetBalance", body).unwrap_err();
        assert!(matches!(
            err,
            TransportError::MissingField {
                operation: "GetBalance",
                field: "Result"
            }
        ));
    }

    #[test]
    fn fault_in_body_is_surfaced() {
        let body = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
            <soap:Body><soap:Fault>
              <faultcode>soap:Server</faultcode>
              <faultstring>Server was unable to process request.</faultstring>
            </soap:Fault></soap:Body></soap:Envelope>"#;
        let err = SoapResult::parse("GetBalance", body).unwrap_err();
        match err {
            TransportError::Fault {
                fault_code,
                fault_string,
            } => {
                assert_eq!(fault_code.as_deref(), Some("soap:Server"));
                assert_eq!(fault_string, "Server was unable to process request.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn items_iterates_repeated_records() {
        let body = "<E><B><GetXResponse><GetXResult>\
                    <errorCode>0</errorCode>\
                    <items>\
                    <ApiResponseItem><state>NJ</state></ApiResponseItem>\
                    <ApiResponseItem><state>NY</state></ApiResponseItem>\
                    </items>\
                    </GetXResult></GetXResponse></B></E>";
        let result = SoapResult::parse("GetX", body).unwrap();
        let states: Vec<_> = result
            .items()
            .filter_map(|item| item.child("state"))
            .map(XmlNode::text)
            .collect();
        assert_eq!(states, vec!["NJ", "NY"]);
    }

    #[test]
    fn items_absent_yields_empty_iterator() {
        let body = "<E><B><GetXResponse><GetXResult>\
                    <errorCode>0</errorCode>\
                    </GetXResult></GetXResponse></B></E>";
        let result = SoapResult::parse("GetX", body).unwrap();
        assert_eq!(result.items().count(), 0);
    }
}
