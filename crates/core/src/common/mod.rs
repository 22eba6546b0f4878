/// # Summary
/// 安装进程级的 rustls 加密后端 (ring)。
///
/// # Logic
/// 1. reqwest 以 `rustls-no-provider` 方式编译，必须在发起 TLS 请求前注册加密后端。
/// 2. 重复安装会返回 Err，此时说明已有后端，直接忽略即可。
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::trace!("rustls crypto provider already installed");
    }
}

/// # Summary
/// 规范化证券代码：去除首尾空白并转为大写。
///
/// # Arguments
/// * `raw`: 客户端传入的原始代码。
///
/// # Returns
/// 规范化后的代码，例如 `" aapl "` -> `"AAPL"`。
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}
