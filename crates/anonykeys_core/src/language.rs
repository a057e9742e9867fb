/// Languages the shell can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    English,
    #[default]
    Russian,
    Arabic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

/// Every label shown by the shell, for one language.
#[derive(Debug, PartialEq, Eq)]
pub struct Translations {
    /// Hint shown on the empty (idle) page.
    pub search: &'static str,
    pub settings: &'static str,
    pub incognito: &'static str,
    pub ad_block: &'static str,
    pub vpn: &'static str,
    pub language: &'static str,
    pub search_placeholder: &'static str,
    pub close: &'static str,
    pub results: PlaceholderTemplates,
}

/// Static decorations combined with the raw query to build placeholder results.
#[derive(Debug, PartialEq, Eq)]
pub struct PlaceholderTemplates {
    pub encyclopedia_suffix: &'static str,
    pub shop_prefix: &'static str,
    pub manual_suffix: &'static str,
}

static ENGLISH: Translations = Translations {
    search: "Search or enter URL",
    settings: "Settings",
    incognito: "Incognito Mode",
    ad_block: "Ad Blocker",
    vpn: "VPN (Canada)",
    language: "Language",
    search_placeholder: "Search the web or enter URL...",
    close: "Close",
    results: PlaceholderTemplates {
        encyclopedia_suffix: " — Wikipedia",
        shop_prefix: "Buy ",
        manual_suffix: " manual",
    },
};

static RUSSIAN: Translations = Translations {
    search: "Поиск или введите URL",
    settings: "Настройки",
    incognito: "Режим инкогнито",
    ad_block: "Блокировка рекламы",
    vpn: "VPN (Канада)",
    language: "Язык",
    search_placeholder: "Поиск в интернете или введите URL...",
    close: "Закрыть",
    results: PlaceholderTemplates {
        encyclopedia_suffix: " — Википедия",
        shop_prefix: "Купить ",
        manual_suffix: " инструкция",
    },
};

static ARABIC: Translations = Translations {
    search: "البحث أو أدخل عنوان URL",
    settings: "الإعدادات",
    incognito: "وضع التصفح المتخفي",
    ad_block: "حاجب الإعلانات",
    vpn: "VPN (كندا)",
    language: "اللغة",
    search_placeholder: "ابحث في الويب أو أدخل عنوان URL...",
    close: "إغلاق",
    results: PlaceholderTemplates {
        encyclopedia_suffix: " — ويكيبيديا",
        shop_prefix: "شراء ",
        manual_suffix: " دليل",
    },
};

impl Language {
    /// Display order of the language selector.
    pub const ALL: [Language; 3] = [Language::English, Language::Russian, Language::Arabic];

    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::Arabic => "ar",
        }
    }

    /// Looks up a language by its tag. There is no negotiation: unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|language| language.tag().eq_ignore_ascii_case(tag.trim()))
    }

    /// Name of the language written in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Russian => "Русский",
            Language::Arabic => "العربية",
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Language::Arabic => TextDirection::RightToLeft,
            Language::English | Language::Russian => TextDirection::LeftToRight,
        }
    }

    pub fn translations(self) -> &'static Translations {
        match self {
            Language::English => &ENGLISH,
            Language::Russian => &RUSSIAN,
            Language::Arabic => &ARABIC,
        }
    }
}
