use std::io;

use smsbridge::{BridgeHandler, HttpGatewaySender, MethodCall, SEND_SMS_METHOD};

fn required_env(name: &str) -> io::Result<String> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_timed();

    let mut builder = HttpGatewaySender::builder(required_env("SMS_GATEWAY_URL")?);
    if let Ok(token) = std::env::var("SMS_GATEWAY_TOKEN") {
        builder = builder.api_token(token);
    }
    if let Ok(sender_id) = std::env::var("SMS_SENDER_ID") {
        builder = builder.sender_id(sender_id);
    }
    if let Ok(region) = std::env::var("SMS_DEFAULT_REGION") {
        let region = region.trim().to_uppercase().parse().map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("SMS_DEFAULT_REGION is not a known region: {region}"),
            )
        })?;
        builder = builder.default_region(region);
    }

    let bridge = BridgeHandler::new(builder.build()?);

    // A raw JSON method call on the command line goes through the channel codec as-is.
    if let Some(message) = std::env::args().nth(1) {
        let reply = bridge.handle_message(message.as_bytes()).await?;
        if reply.is_empty() {
            println!("not implemented");
        } else {
            println!("{}", String::from_utf8_lossy(&reply));
        }
        return Ok(());
    }

    let number = std::env::var("SMS_NUMBER").unwrap_or_default();
    let message = std::env::var("SMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsbridge demo.".to_owned());
    log::info!("dispatching {SEND_SMS_METHOD} on {}", bridge.channel());

    let reply = bridge
        .handle_call(&MethodCall::send_sms(number, message))
        .await;
    println!("{reply:?}");

    Ok(())
}
