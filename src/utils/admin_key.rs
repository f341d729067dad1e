use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const CONTEXT: &[u8] = b"luckywheel-admin-key";

/// 比较提交的管理密钥与配置密钥。
/// 两边各自对固定上下文做 HMAC 得到定长标签, 再用 verify_slice 常数时间比对。
pub fn verify_admin_key(expected: &str, submitted: &str) -> bool {
    let mut expected_mac =
        HmacSha256::new_from_slice(expected.as_bytes()).expect("HMAC can take key of any size");
    expected_mac.update(CONTEXT);
    let expected_tag = expected_mac.finalize().into_bytes();

    let mut submitted_mac =
        HmacSha256::new_from_slice(submitted.as_bytes()).expect("HMAC can take key of any size");
    submitted_mac.update(CONTEXT);
    submitted_mac.verify_slice(&expected_tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_key_accepted() {
        assert!(verify_admin_key("super-secret", "super-secret"));
    }

    #[test]
    fn test_wrong_key_rejected() {
        assert!(!verify_admin_key("super-secret", "super-secre"));
        assert!(!verify_admin_key("super-secret", "super-secret2"));
        assert!(!verify_admin_key("super-secret", ""));
        assert!(!verify_admin_key("", "super-secret"));
    }

    #[test]
    fn test_empty_keys_match() {
        // 空配置密钥只匹配空提交值, 是否允许空密钥由配置层把关
        assert!(verify_admin_key("", ""));
    }
}
