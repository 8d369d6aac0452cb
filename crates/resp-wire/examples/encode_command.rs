use std::io::BufWriter;
use std::io::Write;

use resp_wire::Encoder;
use resp_wire::Resp;
use resp_wire::Text;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	// RUST_LOG=trace shows the encoder's own log records.
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_target(false)
		.init();

	println!("--- RESP Encoding Example ---");

	// Encode into a buffered sink, the way a client would before a socket
	// write.
	let mut enc = Encoder::new(BufWriter::new(Vec::new()));

	enc.encode_command("SET", &[&"greeting", &"ohey", &"EX", &60])?;
	enc.encode_command("ZADD", &[&"scores", &2.5f64, &"alice"])?;
	enc.encode_command("ECHO", &[&Text(std::net::Ipv4Addr::LOCALHOST)])?;
	enc.encode_resp(&Resp::array([
		Resp::simple_string("OK"),
		Resp::integer(-5),
		Resp::nil_bulk_string(),
		Resp::error("ERR something broke"),
	]))?;

	enc.get_mut().flush()?;
	let bytes = enc.into_inner().into_inner()?;

	for line in String::from_utf8_lossy(&bytes).split_inclusive("\r\n") {
		println!("[Encoder] {:?}", line);
	}
	Ok(())
}
