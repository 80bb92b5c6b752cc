//! 静态对照表：名称 ↔ 短代码 ↔ 家族

/// 操作系统名称 -> 短代码
pub(super) const OPERATING_SYSTEMS: &[(&str, &str)] = &[
    ("AIX", "AIX"),
    ("Android", "AND"),
    ("AmigaOS", "AMG"),
    ("Apple TV", "ATV"),
    ("Arch Linux", "ARL"),
    ("BackTrack", "BTR"),
    ("Bada", "SBA"),
    ("BeOS", "BEO"),
    ("BlackBerry OS", "BLB"),
    ("BlackBerry Tablet OS", "QNX"),
    ("Brew", "BMP"),
    ("CentOS", "CES"),
    ("Chrome OS", "COS"),
    ("CyanogenMod", "CYN"),
    ("Debian", "DEB"),
    ("DragonFly", "DFB"),
    ("Fedora", "FED"),
    ("Fire OS", "FIR"),
    ("Firefox OS", "FOS"),
    ("FreeBSD", "BSD"),
    ("Gentoo", "GNT"),
    ("Google TV", "GTV"),
    ("HP-UX", "HPX"),
    ("Haiku OS", "HAI"),
    ("IRIX", "IRI"),
    ("Inferno", "INF"),
    ("Knoppix", "KNO"),
    ("Kubuntu", "KBT"),
    ("GNU/Linux", "LIN"),
    ("Lubuntu", "LBT"),
    ("Mac", "MAC"),
    ("Mandriva", "MDR"),
    ("MeeGo", "SMG"),
    ("Mint", "MIN"),
    ("MorphOS", "MOR"),
    ("NetBSD", "NBS"),
    ("Nintendo", "WII"),
    ("Nintendo Mobile", "NDS"),
    ("OS/2", "OS2"),
    ("OSF1", "T64"),
    ("OpenBSD", "OBS"),
    ("PlayStation Portable", "PSP"),
    ("PlayStation", "PS3"),
    ("Red Hat", "RHT"),
    ("RISC OS", "ROS"),
    ("SUSE", "SSE"),
    ("Sabayon", "SAB"),
    ("Slackware", "SLW"),
    ("Solaris", "SOS"),
    ("Syllable", "SYL"),
    ("Symbian", "SYM"),
    ("Symbian OS", "SYS"),
    ("Symbian OS Series 40", "S40"),
    ("Symbian OS Series 60", "S60"),
    ("Symbian^3", "SY3"),
    ("Tizen", "TIZ"),
    ("Ubuntu", "UBT"),
    ("WebTV", "WTV"),
    ("Windows", "WIN"),
    ("Windows 2000", "W2K"),
    ("Windows 3.1", "W31"),
    ("Windows 7", "WI7"),
    ("Windows 8", "WI8"),
    ("Windows 8.1", "W81"),
    ("Windows 10", "W10"),
    ("Windows 95", "W95"),
    ("Windows 98", "W98"),
    ("Windows CE", "WCE"),
    ("Windows ME", "WME"),
    ("Windows Mobile", "WMO"),
    ("Windows NT", "WNT"),
    ("Windows Phone", "WPH"),
    ("Windows RT", "WRT"),
    ("Windows Server 2003", "WS3"),
    ("Windows Vista", "WVI"),
    ("Windows XP", "WXP"),
    ("Xbox", "XBX"),
    ("Xubuntu", "XBT"),
    ("YunOs", "YNS"),
    ("iOS", "IOS"),
    ("palmOS", "POS"),
    ("webOS", "WOS"),
];

/// 操作系统家族 -> 短代码列表
pub(super) const OS_FAMILIES: &[(&str, &[&str])] = &[
    ("Android", &["AND", "CYN", "FIR", "YNS"]),
    ("AmigaOS", &["AMG", "MOR"]),
    ("Apple TV", &["ATV"]),
    ("BlackBerry", &["BLB", "QNX"]),
    ("Brew", &["BMP"]),
    ("BeOS", &["BEO", "HAI"]),
    ("Chrome OS", &["COS"]),
    ("Firefox OS", &["FOS"]),
    ("Gaming Console", &["WII", "PS3"]),
    ("Google TV", &["GTV"]),
    ("IBM", &["OS2"]),
    ("iOS", &["IOS"]),
    ("RISC OS", &["ROS"]),
    ("Linux", &[
        "LIN", "ARL", "DEB", "KNO", "MIN", "UBT", "KBT", "XBT", "LBT", "FED",
        "RHT", "MDR", "GNT", "SAB", "SLW", "SSE", "CES", "BTR",
    ]),
    ("Mac", &["MAC"]),
    ("Mobile Gaming Console", &["PSP", "NDS", "XBX"]),
    ("Other Mobile", &["WOS", "POS", "SBA", "TIZ", "SMG"]),
    ("Symbian", &["SYM", "SYS", "SY3", "S60", "S40"]),
    ("Unix", &["SOS", "AIX", "HPX", "BSD", "NBS", "OBS", "DFB", "SYL", "IRI", "T64", "INF"]),
    ("WebTV", &["WTV"]),
    ("Windows", &[
        "WIN", "W10", "WI8", "W81", "WI7", "WVI", "WS3", "WXP", "W2K", "WNT",
        "WME", "W98", "W95", "W31", "WRT",
    ]),
    ("Windows Mobile", &["WPH", "WMO", "WCE"]),
];

/// 桌面操作系统家族
pub(super) const DESKTOP_OS_FAMILIES: &[&str] =
    &["AmigaOS", "IBM", "Linux", "Mac", "Unix", "Windows", "BeOS"];

/// Windows 8 家族短代码（触屏启发式规则使用）
pub(super) const WINDOWS_8_CODES: &[&str] = &["WI8", "W81", "WRT"];

/// 浏览器名称 -> 短代码
pub(super) const BROWSERS: &[(&str, &str)] = &[
    ("Android Browser", "AN"),
    ("BlackBerry Browser", "BB"),
    ("Brave", "BR"),
    ("Chrome", "CH"),
    ("Chrome Frame", "CF"),
    ("Chrome Mobile", "CM"),
    ("Chrome Mobile iOS", "CI"),
    ("Chromium", "CR"),
    ("Coc Coc", "CC"),
    ("Dolphin", "DF"),
    ("Epiphany", "EP"),
    ("Firefox", "FF"),
    ("Firefox Mobile", "FM"),
    ("IE Mobile", "IM"),
    ("Iceweasel", "IW"),
    ("Internet Explorer", "IE"),
    ("Konqueror", "KO"),
    ("Links", "LI"),
    ("Lynx", "LX"),
    ("Maxthon", "MX"),
    ("Microsoft Edge", "PS"),
    ("Midori", "MI"),
    ("Mobile Safari", "MF"),
    ("NetFront", "NF"),
    ("Nokia Browser", "NB"),
    ("Opera", "OP"),
    ("Opera Mini", "OI"),
    ("Opera Mobile", "OM"),
    ("Opera Next", "ON"),
    ("Pale Moon", "PM"),
    ("Puffin", "PU"),
    ("Safari", "SF"),
    ("Sailfish Browser", "SA"),
    ("Samsung Browser", "SB"),
    ("SeaMonkey", "SM"),
    ("UC Browser", "UC"),
    ("Vivaldi", "VI"),
    ("Yandex Browser", "YA"),
];

/// 浏览器家族 -> 短代码列表
pub(super) const BROWSER_FAMILIES: &[(&str, &[&str])] = &[
    ("Android Browser", &["AN"]),
    ("BlackBerry Browser", &["BB"]),
    ("Chrome", &["CH", "BR", "CC", "CF", "CM", "CI", "CR", "SB", "VI", "YA"]),
    ("Firefox", &["FF", "FM", "IW", "PM", "SM"]),
    ("Internet Explorer", &["IE", "IM", "PS"]),
    ("Konqueror", &["KO"]),
    ("NetFront", &["NF"]),
    ("Nokia Browser", &["NB"]),
    ("Opera", &["OP", "OM", "OI", "ON"]),
    ("Safari", &["SF", "MF"]),
    ("Sailfish Browser", &["SA"]),
];
