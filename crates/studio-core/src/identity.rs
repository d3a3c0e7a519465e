//! 파라미터 행 식별자 관리.
//!
//! 행은 `semantic_id`가 아닌 `UiKey`로만 식별합니다.
//!
//! - 외부에서 들어온 키 없는 행은 가져오는 시점의 위치로 `fallback:<index>` 키를 받습니다.
//! - 새로 만든 행(수동 추가, 라이브러리 선택)은 `UiKey::mint()` 키를 받습니다.
//! - 편집/삭제는 키로만 대상을 찾으며, 재조정 후에는 이전 키가 무효가 됩니다.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{ParamValue, Parameter, UiKey};
use crate::error::{StudioError, StudioResult};

/// 키가 없는 행에 위치 기반 키를 부여합니다.
///
/// 이미 키가 있는 행은 그대로 둡니다. `fallback:<index>`가 다른 행에서 이미
/// 쓰이고 있으면 새 키를 발급합니다.
pub fn assign_fallback_keys(parameters: &mut [Parameter]) {
    let mut taken: HashSet<UiKey> = parameters.iter().filter_map(|p| p.ui_key.clone()).collect();

    for (index, param) in parameters.iter_mut().enumerate() {
        if param.ui_key.is_some() {
            continue;
        }
        let mut key = UiKey::fallback(index);
        while taken.contains(&key) {
            key = UiKey::mint();
        }
        taken.insert(key.clone());
        param.ui_key = Some(key);
    }
}

/// 외부 페이로드에서 온 목록을 가져옵니다.
///
/// 들어온 키는 모두 버리고 위치 기반 키를 새로 부여합니다.
pub fn import_parameters(mut parameters: Vec<Parameter>) -> Vec<Parameter> {
    for param in parameters.iter_mut() {
        param.ui_key = None;
    }
    assign_fallback_keys(&mut parameters);
    debug!(count = parameters.len(), "파라미터 가져오기 완료");
    parameters
}

/// 키로 행 하나를 찾습니다.
pub fn resolve<'a>(parameters: &'a [Parameter], key: &UiKey) -> Option<&'a Parameter> {
    parameters.iter().find(|p| p.ui_key.as_ref() == Some(key))
}

/// 키로 행 하나를 찾습니다 (가변).
pub fn resolve_mut<'a>(parameters: &'a mut [Parameter], key: &UiKey) -> Option<&'a mut Parameter> {
    parameters.iter_mut().find(|p| p.ui_key.as_ref() == Some(key))
}

/// 키로 찾은 행의 값만 변경합니다.
pub fn edit_value(parameters: &mut [Parameter], key: &UiKey, value: ParamValue) -> StudioResult<()> {
    let param = resolve_mut(parameters, key)
        .ok_or_else(|| StudioError::UnknownParameter(key.to_string()))?;
    param.value = value;
    Ok(())
}

/// 키로 찾은 행을 제거하고 반환합니다.
pub fn remove(parameters: &mut Vec<Parameter>, key: &UiKey) -> StudioResult<Parameter> {
    let index = parameters
        .iter()
        .position(|p| p.ui_key.as_ref() == Some(key))
        .ok_or_else(|| StudioError::UnknownParameter(key.to_string()))?;
    Ok(parameters.remove(index))
}

/// 새 키를 발급해 행을 끝에 추가하고 그 키를 반환합니다.
///
/// 발급된 키가 목록에 이미 있으면 다시 발급합니다.
pub fn append_fresh(parameters: &mut Vec<Parameter>, mut param: Parameter) -> UiKey {
    let mut key = UiKey::mint();
    while resolve(parameters, &key).is_some() {
        key = UiKey::mint();
    }
    param.ui_key = Some(key.clone());
    parameters.push(param);
    key
}

/// 모든 행이 키를 가지고 있고 서로 다른지 확인합니다.
pub fn keys_are_distinct(parameters: &[Parameter]) -> bool {
    let mut seen = HashSet::new();
    parameters
        .iter()
        .all(|p| p.ui_key.as_ref().is_some_and(|k| seen.insert(k)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParameterCategory;
    use proptest::prelude::*;

    fn rsi(value: i32) -> Parameter {
        Parameter::new("rsi_buy", ParameterCategory::Oscillator, "RSI", value)
    }

    #[test]
    fn test_fallback_keys_follow_position() {
        let params = import_parameters(vec![rsi(30), rsi(25), rsi(20)]);
        let keys: Vec<_> = params.iter().map(|p| p.ui_key().unwrap().as_str()).collect();
        assert_eq!(keys, vec!["fallback:0", "fallback:1", "fallback:2"]);
    }

    #[test]
    fn test_import_discards_incoming_keys() {
        let mut stale = rsi(30);
        stale.ui_key = Some(UiKey::new("1700000000000-abcdefgh"));
        let params = import_parameters(vec![stale]);
        assert_eq!(params[0].ui_key().unwrap(), &UiKey::fallback(0));
    }

    #[test]
    fn test_assign_skips_taken_fallback_key() {
        let mut taken = rsi(1);
        taken.ui_key = Some(UiKey::fallback(1));
        let mut params = vec![taken, rsi(2)];
        assign_fallback_keys(&mut params);

        assert_eq!(params[0].ui_key().unwrap(), &UiKey::fallback(1));
        assert!(!params[1].ui_key().unwrap().is_fallback());
        assert!(keys_are_distinct(&params));
    }

    #[test]
    fn test_edit_targets_only_keyed_row() {
        let mut params = import_parameters(vec![rsi(30), rsi(30)]);
        edit_value(&mut params, &UiKey::fallback(1), ParamValue::from(45)).unwrap();

        assert_eq!(params[0].value, ParamValue::Number(30.0));
        assert_eq!(params[1].value, ParamValue::Number(45.0));
    }

    #[test]
    fn test_unknown_key_is_error() {
        let mut params = import_parameters(vec![rsi(30)]);
        let missing = UiKey::new("missing");

        assert!(matches!(
            edit_value(&mut params, &missing, ParamValue::from(1)),
            Err(StudioError::UnknownParameter(_))
        ));
        assert!(remove(&mut params, &missing).is_err());
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_remove_by_key() {
        let mut params = import_parameters(vec![rsi(1), rsi(2), rsi(3)]);
        let removed = remove(&mut params, &UiKey::fallback(1)).unwrap();

        assert_eq!(removed.value, ParamValue::Number(2.0));
        assert_eq!(params.len(), 2);
        assert!(resolve(&params, &UiKey::fallback(1)).is_none());
        assert!(resolve(&params, &UiKey::fallback(2)).is_some());
    }

    #[test]
    fn test_append_fresh_keeps_existing_rows() {
        let mut params = import_parameters(vec![rsi(30)]);
        let key = append_fresh(&mut params, rsi(30));

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].ui_key().unwrap(), &UiKey::fallback(0));
        assert_eq!(params[1].ui_key(), Some(&key));
        assert!(keys_are_distinct(&params));
    }

    proptest! {
        #[test]
        fn prop_fallback_keys_distinct_and_positional(n in 0usize..64) {
            let params = import_parameters((0..n).map(|i| rsi(i as i32)).collect());
            prop_assert!(keys_are_distinct(&params));
            for (i, p) in params.iter().enumerate() {
                prop_assert_eq!(p.ui_key().unwrap(), &UiKey::fallback(i));
            }
        }

        #[test]
        fn prop_appends_preserve_prefix(n in 0usize..16, k in 0usize..16) {
            let mut params = import_parameters((0..n).map(|i| rsi(i as i32)).collect());
            let before = params.clone();
            let mut minted = Vec::new();
            for i in 0..k {
                minted.push(append_fresh(&mut params, rsi(100 + i as i32)));
            }

            prop_assert_eq!(&params[..n], &before[..]);
            for (i, key) in minted.iter().enumerate() {
                prop_assert_eq!(params[n + i].ui_key(), Some(key));
            }
            prop_assert!(keys_are_distinct(&params));
        }
    }
}
