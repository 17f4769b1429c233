//! アクティビティカタログ
//!
//! 車両購入カスタマージャーニーの10段階（固定・順序あり）。
//! キーワードは宣言のみでスコアリングには使わない。
//! 名前はフォールバック時のキー集合として使われる。

/// カスタマージャーニーの1段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    /// 表示名（プロンプト・CSV列名）
    pub name: &'static str,
    /// 関連キーワード（未使用）
    pub keywords: &'static [&'static str],
}

/// 10アクティビティ（宣言順がプロンプト・フォールバックの順序）
pub const ACTIVITIES: [Activity; 10] = [
    Activity {
        name: "Search on the brand’s website",
        keywords: &["website", "online", "internet"],
    },
    Activity {
        name: "First visit to the dealership",
        keywords: &["visit", "dealership", "first time"],
    },
    Activity {
        name: "Model comparison at the dealership",
        keywords: &["comparison", "compare", "models"],
    },
    Activity {
        name: "The test drive",
        keywords: &["test drive", "driving"],
    },
    Activity {
        name: "Valuation of your used one in exchange",
        keywords: &["valuation", "trade-in", "exchange"],
    },
    Activity {
        name: "Negotiating the value of the new car",
        keywords: &["negotiating", "negotiation", "price"],
    },
    Activity {
        name: "Financing at the dealership",
        keywords: &["financing", "finance", "loan"],
    },
    Activity {
        name: "Signing the purchase contract",
        keywords: &["contract", "signing", "agreement"],
    },
    Activity {
        name: "Car delivery",
        keywords: &["delivery", "delivered"],
    },
    Activity {
        name: "First maintenance at the dealership",
        keywords: &["maintenance", "service", "first maintenance"],
    },
];

/// アクティビティ名を宣言順で返す
pub fn activity_names() -> impl Iterator<Item = &'static str> {
    ACTIVITIES.iter().map(|a| a.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_ten_unique_names() {
        let names: HashSet<&str> = activity_names().collect();
        assert_eq!(ACTIVITIES.len(), 10);
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_catalog_order() {
        let names: Vec<&str> = activity_names().collect();
        assert_eq!(names[0], "Search on the brand’s website");
        assert_eq!(names[3], "The test drive");
        assert_eq!(names[9], "First maintenance at the dealership");
    }

    #[test]
    fn test_every_activity_has_keywords() {
        assert!(ACTIVITIES.iter().all(|a| !a.keywords.is_empty()));
    }
}
