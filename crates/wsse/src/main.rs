#![forbid(unsafe_code)]

//! wsse CLI: inspect and build WS-Security X.509 tokens.

use clap::{Parser, Subcommand};
use der::{Decode, Encode};
use log::debug;
use std::path::PathBuf;
use std::process;
use wsse_core::{ns, profile, Error};
use wsse_token::{
    certificate_provider, configure_context, render, BinarySecurityToken, Context, Reference,
    SecurityTokenReference, XmlNode,
};
use wsse_xml::{Element, XmlDocument};
use x509_cert::Certificate;

#[derive(Parser)]
#[command(
    name = "wsse",
    about = "Inspect and build WS-Security X.509 security tokens",
    version
)]
struct Cli {
    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the certificate behind a SecurityTokenReference
    Cert {
        /// Input XML file
        file: PathBuf,

        /// Start from the element with this Id instead of the first
        /// SecurityTokenReference
        #[arg(long)]
        id: Option<String>,

        /// Print the certificate as PEM
        #[arg(long)]
        pem: bool,

        /// Bind an extra namespace prefix (PREFIX=URI)
        #[arg(short = 'p', long = "prefix")]
        prefix: Vec<String>,
    },

    /// List the security tokens found in a document
    Show {
        /// Input XML file
        file: PathBuf,

        /// Bind an extra namespace prefix (PREFIX=URI)
        #[arg(short = 'p', long = "prefix")]
        prefix: Vec<String>,
    },

    /// Wrap a certificate in a BinarySecurityToken and a reference to it
    Wrap {
        /// Certificate file (PEM or DER)
        cert: PathBuf,

        /// wsu:Id given to the BinarySecurityToken
        #[arg(long, default_value = "X509Token")]
        id: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Cert {
            file,
            id,
            pem,
            prefix,
        } => cmd_cert(file, id, pem, prefix),
        Commands::Show { file, prefix } => cmd_show(file, prefix),
        Commands::Wrap { cert, id, output } => cmd_wrap(cert, id, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn cmd_cert(
    file: PathBuf,
    id: Option<String>,
    pem: bool,
    prefixes: Vec<String>,
) -> Result<(), Error> {
    let ctx = load_context(&file, &prefixes)?;

    let start = match &id {
        Some(id) => ctx
            .document()
            .find_by_id(id)
            .ok_or_else(|| Error::ReferenceNotFound(format!("#{id}")))?,
        None => ctx
            .document()
            .find_element_ns(ns::WSSE, ns::node::SECURITY_TOKEN_REFERENCE)
            .ok_or_else(|| Error::Other("no SecurityTokenReference found".into()))?,
    };
    debug!("resolving certificate from <{}>", start.qualified_name());

    let node = load_node(&ctx, start)?;
    let cert = certificate_provider(node.as_ref())?.x509_certificate(&ctx)?;

    if pem {
        let pem = pem_rfc7468::encode_string(
            "CERTIFICATE",
            pem_rfc7468::LineEnding::LF,
            &cert.to_der()?,
        )
        .map_err(|e| Error::Other(format!("failed to encode certificate PEM: {e}")))?;
        print!("{pem}");
    } else {
        print_certificate_summary(&cert, "");
    }
    Ok(())
}

fn cmd_show(file: PathBuf, prefixes: Vec<String>) -> Result<(), Error> {
    let ctx = load_context(&file, &prefixes)?;
    let root = ctx
        .document()
        .root()
        .ok_or_else(|| Error::XmlParse("document has no root element".into()))?;

    let mut nodes = Vec::new();
    collect_tokens(&ctx, root, &mut nodes)?;
    if nodes.is_empty() {
        println!("no security tokens found");
        return Ok(());
    }

    for node in &nodes {
        print_node(node.as_ref(), 0);
        match certificate_provider(node.as_ref()).and_then(|p| p.x509_certificate(&ctx)) {
            Ok(cert) => print_certificate_summary(&cert, "  "),
            Err(e) => println!("  certificate unavailable: {e}"),
        }
        println!();
    }
    Ok(())
}

fn cmd_wrap(cert_path: PathBuf, id: String, output: Option<PathBuf>) -> Result<(), Error> {
    let data = std::fs::read(&cert_path)?;
    let cert = load_certificate(&data)?;

    let mut ctx = Context::default();
    configure_context(&mut ctx);

    let token = BinarySecurityToken::from_certificate(&cert, &id)?;
    let mut reference = Reference::to_id(&id);
    reference.set_value_type(profile::X509V3);
    let str_node = SecurityTokenReference::wrapping(reference);

    let mut out = render(&ctx, &token)?;
    out.push('\n');
    out.push_str(&render(&ctx, &str_node)?);
    out.push('\n');
    write_output(output, out.as_bytes())
}

// ── Utility functions ────────────────────────────────────────────────

/// Parse `file` and build a context with the standard setup plus any
/// `PREFIX=URI` overrides.
fn load_context(file: &PathBuf, prefixes: &[String]) -> Result<Context, Error> {
    let xml = read_file(file)?;
    let mut ctx = Context::new(XmlDocument::parse(&xml)?);
    configure_context(&mut ctx);
    for binding in prefixes {
        let (prefix, uri) = parse_prefix_binding(binding)?;
        ctx.set_namespace_prefix(prefix, uri);
    }
    Ok(ctx)
}

/// Load an X.509 certificate, PEM or DER.
fn load_certificate(data: &[u8]) -> Result<Certificate, Error> {
    if !data.starts_with(b"-----BEGIN") {
        return Ok(Certificate::from_der(data)?);
    }

    let pem_str = std::str::from_utf8(data)
        .map_err(|e| Error::Other(format!("invalid PEM encoding: {e}")))?;
    let (label, der_bytes) = pem_rfc7468::decode_vec(pem_str.trim().as_bytes())
        .map_err(|e| Error::Other(format!("failed to decode certificate PEM: {e}")))?;
    if label != "CERTIFICATE" {
        return Err(Error::Other(format!(
            "expected CERTIFICATE PEM label, got: {label}"
        )));
    }
    Ok(Certificate::from_der(&der_bytes)?)
}

fn parse_prefix_binding(binding: &str) -> Result<(&str, &str), Error> {
    match binding.split_once('=') {
        Some((prefix, uri)) if !prefix.is_empty() && !uri.is_empty() => Ok((prefix, uri)),
        _ => Err(Error::Other(format!(
            "invalid prefix binding: {binding} (expected PREFIX=URI)"
        ))),
    }
}

/// Construct and load the registered node for `el`.
fn load_node(ctx: &Context, el: &Element) -> Result<Box<dyn XmlNode>, Error> {
    let namespace = ctx.element_namespace(el).unwrap_or("");
    let mut node = ctx.construct(namespace, el.name())?;
    node.load_xml(ctx, el)?;
    Ok(node)
}

/// Load every outermost element that has a registered constructor.
fn collect_tokens(
    ctx: &Context,
    el: &Element,
    out: &mut Vec<Box<dyn XmlNode>>,
) -> Result<(), Error> {
    match load_node(ctx, el) {
        Ok(node) => out.push(node),
        Err(Error::NoTypeConstructor { .. }) => {
            for child in el.children() {
                collect_tokens(ctx, child, out)?;
            }
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn print_node(node: &dyn XmlNode, depth: usize) {
    let pad = "  ".repeat(depth);
    if let Some(token) = node.downcast_ref::<BinarySecurityToken>() {
        println!("{pad}BinarySecurityToken");
        println!("{pad}  Id:           {}", token.id());
        println!("{pad}  ValueType:    {}", token.value_type());
        println!("{pad}  EncodingType: {}", token.encoding_type());
        println!("{pad}  Value:        {} characters", token.value().len());
    } else if let Some(reference) = node.downcast_ref::<Reference>() {
        println!("{pad}Reference");
        println!("{pad}  URI:          {}", reference.uri());
        println!("{pad}  ValueType:    {}", reference.value_type());
    } else if let Some(str_node) = node.downcast_ref::<SecurityTokenReference>() {
        println!("{pad}SecurityTokenReference");
        println!("{pad}  Id:           {}", str_node.id());
        println!("{pad}  Usage:        {}", str_node.usage());
        println!("{pad}  TokenType:    {}", str_node.token_type());
        match str_node.content() {
            Some(content) => print_node(content, depth + 1),
            None => println!("{pad}  (no content)"),
        }
    } else {
        println!("{pad}{}", node.element_name());
    }
}

fn print_certificate_summary(cert: &Certificate, pad: &str) {
    let tbs = &cert.tbs_certificate;
    println!("{pad}Subject: {}", tbs.subject);
    println!("{pad}Issuer:  {}", tbs.issuer);
    println!("{pad}Serial:  {}", format_serial(tbs.serial_number.as_bytes()));
}

fn format_serial(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

fn read_file(path: &PathBuf) -> Result<String, Error> {
    std::fs::read_to_string(path)
        .map_err(|e| Error::Other(format!("{}: {e}", path.display())))
}

fn write_output(path: Option<PathBuf>, data: &[u8]) -> Result<(), Error> {
    match path {
        Some(p) => std::fs::write(&p, data)
            .map_err(|e| Error::Other(format!("{}: {e}", p.display()))),
        None => {
            use std::io::Write;
            std::io::stdout().write_all(data)?;
            Ok(())
        }
    }
}
