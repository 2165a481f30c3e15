use url::Url;

use super::envelope::{XmlNode, parse_document};

#[derive(Debug, thiserror::Error)]
pub enum WsdlError {
    #[error("service description is not valid XML: {message}")]
    Xml { message: String },

    #[error("service description declares no SOAP endpoint address")]
    MissingAddress,

    #[error("service description declares an invalid endpoint URL: {value}")]
    InvalidLocation { value: String },
}

/// Extract the SOAP endpoint from a WSDL service description.
///
/// The binding the client needs is the `location` attribute of the first
/// `soap:address` element under a service port.
pub fn service_endpoint(document: &str) -> Result<Url, WsdlError> {
    let root = parse_document(document).map_err(|err| WsdlError::Xml {
        message: err.to_string(),
    })?;
    let address = find_address(&root).ok_or(WsdlError::MissingAddress)?;
    let location = address
        .attribute("location")
        .ok_or(WsdlError::MissingAddress)?;
    Url::parse(location).map_err(|_| WsdlError::InvalidLocation {
        value: location.to_owned(),
    })
}

// descendant() stops at the first name match; address elements without a
// location (e.g. HTTP GET/POST bindings) must be skipped, so walk manually.
fn find_address(node: &XmlNode) -> Option<&XmlNode> {
    if node.name() == "address" && node.attribute("location").is_some() {
        return Some(node);
    }
    node.children().find_map(find_address)
}
