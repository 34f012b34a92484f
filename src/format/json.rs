//! JSON output formatting.

use crate::decode::{DecodeResult, OperationInfo};
use crate::error::{Error, Result};

/// Format a decode result as JSON.
pub fn format_json(result: &DecodeResult) -> Result<String> {
    serde_json::to_string_pretty(result).map_err(|e| Error::FormatError(e.to_string()))
}

/// Format the supported operations as a JSON array.
pub fn format_operations_json(ops: &[OperationInfo]) -> Result<String> {
    serde_json::to_string_pretty(ops).map_err(|e| Error::FormatError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::App;
    use crate::decode::intention::{CollectRewards, Intention, RewardCollection};

    #[test]
    fn test_format_collect_rewards() {
        let result = DecodeResult::new(Intention::CollectRewards(CollectRewards {
            collect_rewards: vec![RewardCollection {
                pool: "0xpool".into(),
                position: "0xpos".into(),
                reward_coin_type: "0x2::sui::SUI".into(),
            }],
        }));
        let output = format_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["txType"], "Other");
        assert_eq!(value["type"], "CollectRewards");
        assert_eq!(
            value["intentionData"]["collectRewards"][0]["rewardCoinType"],
            "0x2::sui::SUI"
        );
    }

    #[test]
    fn test_format_operations() {
        let output = format_operations_json(&App::Bucket.operations()).unwrap();
        assert!(output.contains("\"app\": \"bucket\""));
        assert!(output.contains("buck::repay_debt"));
    }
}
