//! Compiled-in manifest of the project's third-party component libraries.
//!
//! Paths are relative to the project root. Patterns are matched against the
//! full member name. Ultra Librarian bundles (`ul_*`) name their symbol file
//! after the download time, hence the timestamp patterns.

/// A library archive as declared in source.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinLibrary {
    /// Archive path relative to the project root.
    pub path: &'static str,
    /// `(pattern, sha256)` pairs in check order.
    pub checks: &'static [(&'static str, &'static str)],
}

/// Every library archive the project depends on.
pub const LIBRARIES: &[BuiltinLibrary] = &[
    BuiltinLibrary {
        path: "3rd_party/ul_NCP167AMX330TBG.zip",
        checks: &[
            (
                r"KiCADv6/\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}\.kicad_sym",
                "ba3262e20aba960309ea7f405cb4ac15662ab00ed9e0acd686bad9f8468fa383",
            ),
            (
                r"KiCADv6/footprints\.pretty/XDFN4_1X1_711AJ_ONS\.kicad_mod",
                "8a6c17f1985cbf3e110c93fdece9cab754fedfff27bd612bedcb2464c3a02dd4",
            ),
        ],
    },
    BuiltinLibrary {
        path: "3rd_party/ul_2171790001.zip",
        checks: &[
            (
                r"KiCADv6/\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}\.kicad_sym",
                "5af652fd7901813f653c5aa65c51c81227b191e688f94f7cd08e41e5b74cb35e",
            ),
            (
                r"KiCADv6/footprints\.pretty/2171790001_MOL\.kicad_mod",
                "7309c34f68cca23daf23a16d6ca0b9f60f4c8d939e589655fa3ab12ad6391ff5",
            ),
            (
                r"2171790001\.stp",
                "413570c4766b2c88fffffaa8c87c7a4e65dd61550dd9700f9fe5feba5daf01b7",
            ),
        ],
    },
    BuiltinLibrary {
        path: "3rd_party/LIB_AD8403ARUZ1-REEL.zip",
        checks: &[
            (
                r"AD8403ARUZ1-REEL/KiCad/AD8403ARUZ1-REEL\.kicad_sym",
                "7ffd4665412e1365d74a6ffbe1722d706f34480c310b3a2bc92d2f39ead0505c",
            ),
            (
                r"AD8403ARUZ1-REEL/KiCad/SOP65P640X120-24N\.kicad_mod",
                "6da444fa362a93a50d4b4cca09cbd936a2988c40fcaabccba15997c180879473",
            ),
            (
                r"AD8403ARUZ1-REEL/3D/AD8403ARUZ1-REEL\.stp",
                "531ea6cf5fad798ee00b37429d4dfa3dce9d677cdc2492a1e5dc11e624a775e2",
            ),
        ],
    },
    BuiltinLibrary {
        path: "3rd_party/LIB_ADG801BRTZ-REEL7.zip",
        checks: &[
            (
                r"ADG801BRTZ-REEL7/KiCad/ADG801BRTZ-REEL7\.kicad_sym",
                "08cdbaacc750edb167343029685ea4f22cf0066b7526e728e0550bb1cdfecd49",
            ),
            (
                r"ADG801BRTZ-REEL7/KiCad/SOT95P280X145-6N\.kicad_mod",
                "80d29e079968e4515761f9681b484985a007dad5ef0518a9b400d7cec689d581",
            ),
            (
                r"ADG801BRTZ-REEL7/3D/ADG801BRTZ-REEL7\.stp",
                "f44508dfccc3e09e3621e6790193a5b3930335bbac1efcbc8ff6425c82e4db50",
            ),
        ],
    },
    BuiltinLibrary {
        path: "3rd_party/LIB_AWSCR-12.00CELA-C33-T3.zip",
        checks: &[
            (
                r"AWSCR-12.00CELA-C33-T3/KiCad/AWSCR-12_00CELA-C33-T3\.kicad_sym",
                "c76284816b0987d3b089de7559b73b042092913c173acf60a72a74fe0641f8ff",
            ),
            (
                r"AWSCR-12.00CELA-C33-T3/KiCad/AWSCR1200CELAC33T3\.kicad_mod",
                "a1eded293c7d696bee23449b43ab5a7d9b775050cb321abd7a6d8249f23dee9a",
            ),
        ],
    },
    BuiltinLibrary {
        path: "3rd_party/LIB_DS4424N+T&R.zip",
        checks: &[
            (
                r"DS4424N\+T&R/KiCad/DS4424N\+T&R\.kicad_sym",
                "51daf99f44e625901b89760704761d74b6422363e2d685339a4e962035697972",
            ),
            (
                r"DS4424N\+T&R/KiCad/SON40P300X300X80-15N\.kicad_mod",
                "68688c38fa5d92b6ba580cc1a017e18f706f6e7582f00ecb5a9e712010fbecac",
            ),
            (
                r"DS4424N\+T&R/3D/DS4424N\+T&R\.stp",
                "d19e992a8e045d6d67ee2e45fbd1bad91a7412a375390366f23da2a383bd8e72",
            ),
        ],
    },
    BuiltinLibrary {
        path: "3rd_party/LIB_MCP659-E_ML.zip",
        checks: &[
            (
                r"MCP659-E_ML/KiCad/MCP659-E_ML\.kicad_sym",
                "aa230ca193e6803deac84522e3a15c536ecf7a2ca21e39807d062d3b9521faf9",
            ),
            (
                r"MCP659-E_ML/KiCad/QFN65P400X400X100-17N-D\.kicad_mod",
                "81e77a738eeb0811d3c2d9d616e84dccf4df7bb67520dc6ba07b24e73b2b914f",
            ),
            (
                r"MCP659-E_ML/3D/MCP659-E_ML\.stp",
                "a516db06f9c4ca513d6abbbabcf0a956fcda2bc4f86bdf3c9439f42b7e0ae690",
            ),
        ],
    },
    BuiltinLibrary {
        path: "3rd_party/LIB_SK6805-EC15.zip",
        checks: &[
            (
                r"SK6805-EC15/KiCad/SK6805-EC15\.kicad_sym",
                "77a647ea858def8364ecba66956c6fdfdea4c09e2c0a8b94295358ea37012d63",
            ),
            (
                r"SK6805-EC15/KiCad/SK6805EC15\.kicad_mod",
                "e1dc39cad2d3fc322f337a5b51e06bf3a04d6661c17bce43ec8a3d7bb97b9a76",
            ),
            (
                r"SK6805-EC15/3D/SK6805-EC15\.stp",
                "2d9447015b4800b7e6d31c0da52cc7fa227693080d0a520d3b8b8b334dda8fbe",
            ),
        ],
    },
    BuiltinLibrary {
        path: "3rd_party/LIB_TC42X-2-102E.zip",
        checks: &[
            (
                r"TC42X-2-102E/KiCad/TC42X-2-102E\.kicad_sym",
                "a7188a947a8c9fe469d2ffe386a6f8f1a39b33075c490c30d8b27c22e2a7595f",
            ),
            (
                r"TC42X-2-102E/KiCad/TC42X2102E\.kicad_mod",
                "21185e9748388b345805631fcf86d35e53f921551985abb07d7bbdc0fbdc4c00",
            ),
            (
                r"TC42X-2-102E/3D/TC42X-2-102E\.stp",
                "5209c21684bdeb9b537a96e50d5d875babf3b80a4f1ba964d5a2ff38f2c99c45",
            ),
        ],
    },
    BuiltinLibrary {
        path: "3rd_party/LIB_W25Q16JVUXIQ.zip",
        checks: &[
            (
                r"W25Q16JVUXIQ/KiCad/W25Q16JVUXIQ\.kicad_sym",
                "3950a6bec2de7ab394b59addb3d076008a89d1b137f669c085cf62e7eecf72c2",
            ),
            (
                r"W25Q16JVUXIQ/KiCad/SON50P300X200X60-9N\.kicad_mod",
                "a87214a32557c5b76aacfd60dde051d595ee152e77fdfd79e3a4b3f9440d254e",
            ),
            (
                r"W25Q16JVUXIQ/3D/W25Q16JVUXIQ\.stp",
                "05ad1ea726e5177f628cce20d117f2648a2c35c9b77ad6be5ad27cd83d2789c4",
            ),
        ],
    },
    BuiltinLibrary {
        path: "3rd_party/LIB_XCL103D503CR-G.zip",
        checks: &[
            (
                r"XCL103D503CR-G/KiCad/XCL103D503CR-G\.kicad_sym",
                "9d3dfa841914e52778b306a917204f59bacdbbc0bfae043327e6cd87df23d04b",
            ),
            (
                r"XCL103D503CR-G/KiCad/XCL103D503CRG\.kicad_mod",
                "eb6c7ec76f48ac3cb36a9136e6b3f21294fead8d84e3effd8bdfe804bf002324",
            ),
            (
                r"XCL103D503CR-G/3D/XCL103D503CR-G\.stp",
                "e041e96ec9c52ece6b0aa7423609c03bcab3e2a2fb0074bfdf1ef669c9d82e1d",
            ),
        ],
    },
];
