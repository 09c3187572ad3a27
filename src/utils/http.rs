use std::time::Duration;

use reqwest::Client;

use crate::config::HttpConfig;

pub fn create_instagram_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let builder = Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_idle_timeout(Duration::from_secs(60))
        .tcp_keepalive(Duration::from_secs(30))
        .user_agent(config.user_agent.as_str());

    build_client(builder, config.proxy.as_deref())
}

fn build_client(builder: reqwest::ClientBuilder, proxy: Option<&str>) -> Result<Client, reqwest::Error> {
    match proxy {
        Some(proxy_url) => {
            info!("Configuring client with proxy {}", proxy_url);
            builder.proxy(reqwest::Proxy::all(proxy_url)?).build()
        }
        None => builder.build(),
    }
}
