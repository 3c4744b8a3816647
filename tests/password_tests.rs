use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use auth_seed::model::auth_record::GUEST_PASSWORD_HASH;
use auth_seed::util::password::*;

fn small_argon2i_hash(password: &str) -> String {
    let params = Params::new(8192, 2, 1, None).unwrap();
    let argon2 = Argon2::new(Algorithm::Argon2i, Version::V0x13, params);
    let salt = SaltString::from_b64("YWJjZGVmZ2hpamtsbW5vcA").unwrap();
    argon2.hash_password(password.as_bytes(), &salt).unwrap().to_string()
}

#[test]
fn test_describe_seed_hash() {
    let scheme = PasswordUtilsImpl::describe_hash(GUEST_PASSWORD_HASH).unwrap();
    assert_eq!(scheme.algorithm, "argon2i");
    assert_eq!(scheme.version, Some(19));
    assert_eq!(scheme.memory_kib, 102400);
    assert_eq!(scheme.iterations, 2);
    assert_eq!(scheme.parallelism, 8);
    assert_eq!(scheme.salt, "S4lRqpWSck7JGWMMgTDGGA");
}

#[test]
fn test_describe_hash_rejects_garbage() {
    let result = PasswordUtilsImpl::describe_hash("not-a-hash");
    assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
}

#[test]
fn test_describe_hash_empty_string() {
    assert!(PasswordUtilsImpl::describe_hash("").is_err());
}

#[test]
fn test_describe_hash_missing_cost_parameter() {
    let result = PasswordUtilsImpl::describe_hash("$argon2i$v=19$t=2,p=8$S4lRqpWSck7JGWMMgTDGGA$MRa3VgoE5o1qZET5/yBRBA");
    assert!(matches!(result, Err(PasswordError::MissingParameter("m"))));
}

#[test]
fn test_describe_generated_hash() {
    let hash = small_argon2i_hash("guest-secret");
    let scheme = PasswordUtilsImpl::describe_hash(&hash).unwrap();
    assert_eq!(scheme.algorithm, "argon2i");
    assert_eq!(scheme.memory_kib, 8192);
    assert_eq!(scheme.parallelism, 1);
}

#[test]
fn test_verify_password_against_argon2i_hash() {
    let hash = small_argon2i_hash("guest-secret");
    assert!(PasswordUtilsImpl::verify_password("guest-secret", &hash).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("Guest-secret", &hash).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("", &hash).unwrap());
}

#[test]
fn test_verify_wrong_password_against_seed_hash() {
    let result = PasswordUtilsImpl::verify_password("definitely-not-it", GUEST_PASSWORD_HASH);
    assert!(matches!(result, Ok(false)));
}

#[test]
fn test_verify_password_invalid_hash() {
    let result = PasswordUtilsImpl::verify_password("password", "argon2i-without-dollars");
    assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
}
