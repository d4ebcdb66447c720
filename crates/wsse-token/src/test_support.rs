//! Certificate fixtures shared by the unit tests.

use base64::Engine;

const SIGNER_PEM: &str = include_str!("../tests/data/signer.pem");
const OTHER_PEM: &str = include_str!("../tests/data/other.pem");

fn pem_to_der(pem: &str) -> Vec<u8> {
    let (label, der) = pem_rfc7468::decode_vec(pem.trim().as_bytes()).expect("fixture PEM");
    assert_eq!(label, "CERTIFICATE");
    der
}

pub fn signer_der() -> Vec<u8> {
    pem_to_der(SIGNER_PEM)
}

pub fn signer_b64() -> String {
    base64::engine::general_purpose::STANDARD.encode(signer_der())
}

pub fn other_b64() -> String {
    base64::engine::general_purpose::STANDARD.encode(pem_to_der(OTHER_PEM))
}
