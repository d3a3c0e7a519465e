//! 시장 카탈로그.
//!
//! 시장 유형별로 선택 가능한 섹터 목록입니다.

use serde::Serialize;

/// 시장 정보.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketInfo {
    /// 시장 유형 (예: "KOSPI")
    #[serde(rename = "type")]
    pub market_type: &'static str,
    /// 유효 섹터
    pub sectors: &'static [&'static str],
}

impl MarketInfo {
    pub fn has_sector(&self, sector: &str) -> bool {
        self.sectors.contains(&sector)
    }
}

const KOSPI_SECTORS: &[&str] = &[
    "반도체", "2차전지", "자동차", "바이오/제약", "인터넷/플랫폼", "게임", "조선/해운", "방산",
    "원자력", "철강", "화학/정유", "건설", "금융/은행", "지주사", "식음료", "유통", "통신",
    "엔터테인먼트", "화장품", "항공/우주",
];

const KOSDAQ_SECTORS: &[&str] = &[
    "AI/로봇", "메타버스", "NFT/블록체인", "2차전지 소재", "반도체 소부장", "진단키트",
    "신약개발", "의료기기", "웹툰/컨텐츠", "엔터/음원", "5G/통신장비", "자율주행",
    "스마트팩토리", "비료/사료", "교육", "보안",
];

const NASDAQ_SECTORS: &[&str] = &[
    "Big Tech (MAGA)", "Semiconductor", "Cloud/SaaS", "Cybersecurity", "AI & BigData",
    "E-commerce", "Fintech", "EV (Electric Vehicle)", "Biotech", "Healthcare", "Gaming",
    "Social Media", "Clean Energy", "Streaming", "Metaverse", "Space", "Robotics",
    "3D Printing",
];

const CRYPTO_SECTORS: &[&str] = &[
    "Layer 1", "Layer 2", "DeFi", "NFT", "Metaverse", "GameFi", "Meme Coin", "Stablecoin",
    "Oracle", "DEX", "Privacy", "Web3", "Storage", "Infrastructure", "DAO", "Lending", "Bridge",
];

/// 지원 시장 목록 (표시 순서).
pub const MARKETS: [MarketInfo; 4] = [
    MarketInfo {
        market_type: "KOSPI",
        sectors: KOSPI_SECTORS,
    },
    MarketInfo {
        market_type: "KOSDAQ",
        sectors: KOSDAQ_SECTORS,
    },
    MarketInfo {
        market_type: "NASDAQ",
        sectors: NASDAQ_SECTORS,
    },
    MarketInfo {
        market_type: "Crypto",
        sectors: CRYPTO_SECTORS,
    },
];

/// 시장 유형으로 카탈로그를 조회합니다.
pub fn find_market(market_type: &str) -> Option<&'static MarketInfo> {
    MARKETS.iter().find(|m| m.market_type == market_type)
}

/// 해당 시장의 섹터 목록 (알 수 없는 시장이면 빈 목록).
pub fn sectors_for(market_type: &str) -> &'static [&'static str] {
    find_market(market_type).map_or(&[], |m| m.sectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(MARKETS.len(), 4);
        assert_eq!(sectors_for("KOSPI").len(), 20);
        assert_eq!(sectors_for("KOSDAQ").len(), 16);
        assert_eq!(sectors_for("NASDAQ").len(), 18);
        assert_eq!(sectors_for("Crypto").len(), 17);
        assert!(sectors_for("NYSE").is_empty());

        let kospi = find_market("KOSPI").unwrap();
        assert!(kospi.has_sector("반도체"));
        assert!(!kospi.has_sector("DeFi"));
    }

    #[test]
    fn test_catalog_serializes_type_name() {
        let json = serde_json::to_value(MARKETS[3]).unwrap();
        assert_eq!(json["type"], "Crypto");
        assert_eq!(json["sectors"][0], "Layer 1");
    }
}
