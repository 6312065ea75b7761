/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 適用順は app::build_router が決める
 */
pub mod cors;
pub mod http;
pub mod security_headers;
