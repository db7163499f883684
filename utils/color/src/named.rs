//! CSS named colors.

/// `(name, argb)` pairs of the CSS named colors, sorted by name.
pub(crate) const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xFF_F0F8FF),
    ("antiquewhite", 0xFF_FAEBD7),
    ("aqua", 0xFF_00FFFF),
    ("aquamarine", 0xFF_7FFFD4),
    ("azure", 0xFF_F0FFFF),
    ("beige", 0xFF_F5F5DC),
    ("bisque", 0xFF_FFE4C4),
    ("black", 0xFF_000000),
    ("blanchedalmond", 0xFF_FFEBCD),
    ("blue", 0xFF_0000FF),
    ("blueviolet", 0xFF_8A2BE2),
    ("brown", 0xFF_A52A2A),
    ("burlywood", 0xFF_DEB887),
    ("cadetblue", 0xFF_5F9EA0),
    ("chartreuse", 0xFF_7FFF00),
    ("chocolate", 0xFF_D2691E),
    ("coral", 0xFF_FF7F50),
    ("cornflowerblue", 0xFF_6495ED),
    ("cornsilk", 0xFF_FFF8DC),
    ("crimson", 0xFF_DC143C),
    ("cyan", 0xFF_00FFFF),
    ("darkblue", 0xFF_00008B),
    ("darkcyan", 0xFF_008B8B),
    ("darkgoldenrod", 0xFF_B8860B),
    ("darkgray", 0xFF_A9A9A9),
    ("darkgreen", 0xFF_006400),
    ("darkgrey", 0xFF_A9A9A9),
    ("darkkhaki", 0xFF_BDB76B),
    ("darkmagenta", 0xFF_8B008B),
    ("darkolivegreen", 0xFF_556B2F),
    ("darkorange", 0xFF_FF8C00),
    ("darkorchid", 0xFF_9932CC),
    ("darkred", 0xFF_8B0000),
    ("darksalmon", 0xFF_E9967A),
    ("darkseagreen", 0xFF_8FBC8F),
    ("darkslateblue", 0xFF_483D8B),
    ("darkslategray", 0xFF_2F4F4F),
    ("darkslategrey", 0xFF_2F4F4F),
    ("darkturquoise", 0xFF_00CED1),
    ("darkviolet", 0xFF_9400D3),
    ("deeppink", 0xFF_FF1493),
    ("deepskyblue", 0xFF_00BFFF),
    ("dimgray", 0xFF_696969),
    ("dimgrey", 0xFF_696969),
    ("dodgerblue", 0xFF_1E90FF),
    ("firebrick", 0xFF_B22222),
    ("floralwhite", 0xFF_FFFAF0),
    ("forestgreen", 0xFF_228B22),
    ("fuchsia", 0xFF_FF00FF),
    ("gainsboro", 0xFF_DCDCDC),
    ("ghostwhite", 0xFF_F8F8FF),
    ("gold", 0xFF_FFD700),
    ("goldenrod", 0xFF_DAA520),
    ("gray", 0xFF_808080),
    ("green", 0xFF_008000),
    ("greenyellow", 0xFF_ADFF2F),
    ("grey", 0xFF_808080),
    ("honeydew", 0xFF_F0FFF0),
    ("hotpink", 0xFF_FF69B4),
    ("indianred", 0xFF_CD5C5C),
    ("indigo", 0xFF_4B0082),
    ("ivory", 0xFF_FFFFF0),
    ("khaki", 0xFF_F0E68C),
    ("lavender", 0xFF_E6E6FA),
    ("lavenderblush", 0xFF_FFF0F5),
    ("lawngreen", 0xFF_7CFC00),
    ("lemonchiffon", 0xFF_FFFACD),
    ("lightblue", 0xFF_ADD8E6),
    ("lightcoral", 0xFF_F08080),
    ("lightcyan", 0xFF_E0FFFF),
    ("lightgoldenrodyellow", 0xFF_FAFAD2),
    ("lightgray", 0xFF_D3D3D3),
    ("lightgreen", 0xFF_90EE90),
    ("lightgrey", 0xFF_D3D3D3),
    ("lightpink", 0xFF_FFB6C1),
    ("lightsalmon", 0xFF_FFA07A),
    ("lightseagreen", 0xFF_20B2AA),
    ("lightskyblue", 0xFF_87CEFA),
    ("lightslategray", 0xFF_778899),
    ("lightslategrey", 0xFF_778899),
    ("lightsteelblue", 0xFF_B0C4DE),
    ("lightyellow", 0xFF_FFFFE0),
    ("lime", 0xFF_00FF00),
    ("limegreen", 0xFF_32CD32),
    ("linen", 0xFF_FAF0E6),
    ("magenta", 0xFF_FF00FF),
    ("maroon", 0xFF_800000),
    ("mediumaquamarine", 0xFF_66CDAA),
    ("mediumblue", 0xFF_0000CD),
    ("mediumorchid", 0xFF_BA55D3),
    ("mediumpurple", 0xFF_9370DB),
    ("mediumseagreen", 0xFF_3CB371),
    ("mediumslateblue", 0xFF_7B68EE),
    ("mediumspringgreen", 0xFF_00FA9A),
    ("mediumturquoise", 0xFF_48D1CC),
    ("mediumvioletred", 0xFF_C71585),
    ("midnightblue", 0xFF_191970),
    ("mintcream", 0xFF_F5FFFA),
    ("mistyrose", 0xFF_FFE4E1),
    ("moccasin", 0xFF_FFE4B5),
    ("navajowhite", 0xFF_FFDEAD),
    ("navy", 0xFF_000080),
    ("oldlace", 0xFF_FDF5E6),
    ("olive", 0xFF_808000),
    ("olivedrab", 0xFF_6B8E23),
    ("orange", 0xFF_FFA500),
    ("orangered", 0xFF_FF4500),
    ("orchid", 0xFF_DA70D6),
    ("palegoldenrod", 0xFF_EEE8AA),
    ("palegreen", 0xFF_98FB98),
    ("paleturquoise", 0xFF_AFEEEE),
    ("palevioletred", 0xFF_DB7093),
    ("papayawhip", 0xFF_FFEFD5),
    ("peachpuff", 0xFF_FFDAB9),
    ("peru", 0xFF_CD853F),
    ("pink", 0xFF_FFC0CB),
    ("plum", 0xFF_DDA0DD),
    ("powderblue", 0xFF_B0E0E6),
    ("purple", 0xFF_800080),
    ("red", 0xFF_FF0000),
    ("rosybrown", 0xFF_BC8F8F),
    ("royalblue", 0xFF_4169E1),
    ("saddlebrown", 0xFF_8B4513),
    ("salmon", 0xFF_FA8072),
    ("sandybrown", 0xFF_F4A460),
    ("seagreen", 0xFF_2E8B57),
    ("seashell", 0xFF_FFF5EE),
    ("sienna", 0xFF_A0522D),
    ("silver", 0xFF_C0C0C0),
    ("skyblue", 0xFF_87CEEB),
    ("slateblue", 0xFF_6A5ACD),
    ("slategray", 0xFF_708090),
    ("slategrey", 0xFF_708090),
    ("snow", 0xFF_FFFAFA),
    ("springgreen", 0xFF_00FF7F),
    ("steelblue", 0xFF_4682B4),
    ("tan", 0xFF_D2B48C),
    ("teal", 0xFF_008080),
    ("thistle", 0xFF_D8BFD8),
    ("tomato", 0xFF_FF6347),
    ("turquoise", 0xFF_40E0D0),
    ("violet", 0xFF_EE82EE),
    ("wheat", 0xFF_F5DEB3),
    ("white", 0xFF_FFFFFF),
    ("whitesmoke", 0xFF_F5F5F5),
    ("yellow", 0xFF_FFFF00),
    ("yellowgreen", 0xFF_9ACD32),
];
