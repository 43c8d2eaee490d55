/// First-level administrative division. `name` doubles as the key used to
/// locate the province's boundary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Province {
    pub name: &'static str,
    pub short_name: &'static str,
    pub aliases: &'static [&'static str],
}

impl Province {
    /// Full name, short name, and legacy aliases.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        [self.name, self.short_name]
            .into_iter()
            .chain(self.aliases.iter().copied())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        self.names().any(|name| name == candidate)
    }
}

pub const PROVINCES: [Province; 17] = [
    Province {
        name: "서울특별시",
        short_name: "서울",
        aliases: &["서울시"],
    },
    Province {
        name: "부산광역시",
        short_name: "부산",
        aliases: &["부산시"],
    },
    Province {
        name: "대구광역시",
        short_name: "대구",
        aliases: &["대구시"],
    },
    Province {
        name: "인천광역시",
        short_name: "인천",
        aliases: &["인천시"],
    },
    Province {
        name: "광주광역시",
        short_name: "광주",
        aliases: &[],
    },
    Province {
        name: "대전광역시",
        short_name: "대전",
        aliases: &["대전시"],
    },
    Province {
        name: "울산광역시",
        short_name: "울산",
        aliases: &["울산시"],
    },
    Province {
        name: "세종특별자치시",
        short_name: "세종",
        aliases: &["세종시"],
    },
    Province {
        name: "경기도",
        short_name: "경기",
        aliases: &[],
    },
    Province {
        name: "강원특별자치도",
        short_name: "강원",
        aliases: &["강원도"],
    },
    Province {
        name: "충청북도",
        short_name: "충북",
        aliases: &[],
    },
    Province {
        name: "충청남도",
        short_name: "충남",
        aliases: &[],
    },
    Province {
        name: "전북특별자치도",
        short_name: "전북",
        aliases: &["전라북도"],
    },
    Province {
        name: "전라남도",
        short_name: "전남",
        aliases: &[],
    },
    Province {
        name: "경상북도",
        short_name: "경북",
        aliases: &[],
    },
    Province {
        name: "경상남도",
        short_name: "경남",
        aliases: &[],
    },
    Province {
        name: "제주특별자치도",
        short_name: "제주",
        aliases: &["제주도"],
    },
];

pub fn find_province(name: &str) -> Option<&'static Province> {
    PROVINCES.iter().find(|province| province.matches(name))
}
