//! Static UK region data: outcode spans per county and the northern set.

/// A run of districts within one postcode area, e.g. ME1..=ME20.
#[derive(Debug, Clone, Copy)]
pub struct OutcodeSpan {
    pub area: &'static str,
    pub first: u8,
    pub last: u8,
}

impl OutcodeSpan {
    pub fn contains(&self, area: &str, district: u8) -> bool {
        self.area == area && (self.first..=self.last).contains(&district)
    }
}

/// Outcodes belonging to one county.
#[derive(Debug, Clone, Copy)]
pub struct OutcodeGroup {
    pub county: &'static str,
    pub spans: &'static [OutcodeSpan],
}

const fn span(area: &'static str, first: u8, last: u8) -> OutcodeSpan {
    OutcodeSpan { area, first, last }
}

/// Lookup order matters where spans overlap: the first group wins.
pub static OUTCODE_GROUPS: &[OutcodeGroup] = &[
    OutcodeGroup {
        county: "Kent",
        spans: &[span("ME", 1, 20), span("CT", 1, 21), span("DA", 1, 18), span("TN", 1, 30)],
    },
    OutcodeGroup {
        county: "Greater London",
        spans: &[
            span("E", 1, 20),
            span("EC", 1, 4),
            span("N", 1, 22),
            span("NW", 1, 11),
            span("SE", 1, 28),
            span("SW", 1, 20),
            span("W", 1, 14),
            span("WC", 1, 2),
            span("BR", 1, 8),
            span("CR", 0, 9),
            span("EN", 1, 5),
            span("HA", 0, 9),
            span("IG", 1, 11),
            span("KT", 1, 6),
            span("RM", 1, 13),
            span("SM", 1, 7),
            span("TW", 1, 14),
            span("UB", 1, 11),
        ],
    },
    OutcodeGroup {
        county: "East Sussex",
        spans: &[span("BN", 1, 10), span("BN", 20, 27), span("TN", 31, 40)],
    },
    OutcodeGroup {
        county: "West Sussex",
        spans: &[span("BN", 11, 18), span("RH", 10, 20), span("PO", 18, 22), span("GU", 28, 29)],
    },
    OutcodeGroup {
        county: "Surrey",
        spans: &[span("GU", 1, 10), span("GU", 15, 27), span("KT", 7, 24), span("RH", 1, 9), span("TW", 15, 20)],
    },
    OutcodeGroup {
        county: "Hampshire",
        spans: &[
            span("SO", 14, 53),
            span("PO", 1, 17),
            span("GU", 11, 14),
            span("GU", 30, 35),
            span("GU", 46, 52),
            span("RG", 20, 29),
            span("SP", 6, 6),
            span("SP", 9, 11),
            span("BH", 23, 25),
        ],
    },
    OutcodeGroup {
        county: "Dorset",
        spans: &[span("BH", 1, 22), span("DT", 1, 11), span("SP", 7, 8)],
    },
    OutcodeGroup {
        county: "Wiltshire",
        spans: &[span("SN", 1, 16), span("BA", 12, 15), span("SP", 1, 5)],
    },
    OutcodeGroup {
        county: "Bristol",
        spans: &[span("BS", 1, 16), span("BS", 30, 41)],
    },
    OutcodeGroup {
        county: "Somerset",
        spans: &[span("BA", 1, 11), span("BA", 16, 22), span("TA", 1, 24), span("BS", 20, 29)],
    },
    OutcodeGroup {
        county: "Devon",
        spans: &[span("EX", 1, 39), span("PL", 1, 21), span("TQ", 1, 14)],
    },
    OutcodeGroup {
        county: "Cornwall",
        spans: &[span("TR", 1, 27), span("PL", 22, 35)],
    },
    OutcodeGroup {
        county: "Gloucestershire",
        spans: &[span("GL", 1, 20), span("GL", 50, 56)],
    },
    OutcodeGroup {
        county: "Oxfordshire",
        spans: &[span("OX", 1, 49)],
    },
    OutcodeGroup {
        county: "Berkshire",
        spans: &[span("RG", 1, 19), span("RG", 30, 45), span("SL", 1, 6)],
    },
    OutcodeGroup {
        county: "Buckinghamshire",
        spans: &[span("HP", 5, 23), span("HP", 27, 27), span("MK", 1, 19), span("SL", 7, 9)],
    },
    OutcodeGroup {
        county: "Hertfordshire",
        spans: &[span("AL", 1, 10), span("SG", 1, 14), span("WD", 3, 25), span("EN", 6, 11), span("HP", 1, 4)],
    },
    OutcodeGroup {
        county: "Bedfordshire",
        spans: &[span("LU", 1, 7), span("MK", 40, 45), span("SG", 15, 19)],
    },
    OutcodeGroup {
        county: "Essex",
        spans: &[span("CM", 0, 24), span("CO", 1, 16), span("SS", 0, 17)],
    },
    OutcodeGroup {
        county: "Suffolk",
        spans: &[span("IP", 1, 33)],
    },
    OutcodeGroup {
        county: "Norfolk",
        spans: &[span("NR", 1, 35), span("PE", 30, 38)],
    },
    OutcodeGroup {
        county: "Cambridgeshire",
        spans: &[span("CB", 1, 25), span("PE", 1, 8), span("PE", 13, 19), span("PE", 26, 29)],
    },
    OutcodeGroup {
        county: "Lincolnshire",
        spans: &[span("LN", 1, 13), span("PE", 9, 12), span("PE", 20, 25), span("NG", 31, 34)],
    },
    OutcodeGroup {
        county: "North East Lincolnshire",
        spans: &[span("DN", 31, 41)],
    },
    OutcodeGroup {
        county: "Northamptonshire",
        spans: &[span("NN", 1, 18)],
    },
    OutcodeGroup {
        county: "Leicestershire",
        spans: &[span("LE", 1, 19)],
    },
    OutcodeGroup {
        county: "Nottinghamshire",
        spans: &[span("NG", 1, 25)],
    },
    OutcodeGroup {
        county: "Derbyshire",
        spans: &[
            span("DE", 1, 7),
            span("DE", 11, 12),
            span("DE", 21, 24),
            span("DE", 45, 56),
            span("DE", 65, 75),
            span("S", 40, 45),
            span("SK", 17, 17),
            span("SK", 22, 23),
        ],
    },
    OutcodeGroup {
        county: "Staffordshire",
        spans: &[span("ST", 1, 21), span("DE", 13, 15), span("WS", 7, 15)],
    },
    OutcodeGroup {
        county: "West Midlands",
        spans: &[span("B", 1, 48), span("CV", 1, 7), span("DY", 1, 9), span("WV", 1, 16), span("WS", 1, 6)],
    },
    OutcodeGroup {
        county: "Warwickshire",
        spans: &[span("CV", 8, 37), span("B", 49, 50), span("B", 78, 80), span("B", 94, 95)],
    },
    OutcodeGroup {
        county: "Worcestershire",
        spans: &[span("WR", 1, 15), span("B", 60, 61), span("B", 96, 98), span("DY", 10, 14)],
    },
    OutcodeGroup {
        county: "Herefordshire",
        spans: &[span("HR", 1, 9)],
    },
    OutcodeGroup {
        county: "Shropshire",
        spans: &[span("SY", 1, 15), span("TF", 1, 13)],
    },
    OutcodeGroup {
        county: "Merseyside",
        spans: &[span("L", 1, 40), span("CH", 41, 66), span("PR", 8, 9)],
    },
    OutcodeGroup {
        county: "Cheshire",
        spans: &[span("CH", 1, 8), span("CW", 1, 12), span("WA", 1, 16), span("SK", 9, 12)],
    },
    OutcodeGroup {
        county: "Greater Manchester",
        spans: &[
            span("M", 1, 90),
            span("BL", 0, 9),
            span("OL", 1, 16),
            span("SK", 1, 8),
            span("SK", 14, 16),
            span("WN", 1, 8),
        ],
    },
    OutcodeGroup {
        county: "Lancashire",
        spans: &[
            span("PR", 0, 7),
            span("PR", 25, 26),
            span("BB", 1, 12),
            span("BB", 18, 18),
            span("FY", 0, 8),
            span("LA", 1, 7),
        ],
    },
    OutcodeGroup {
        county: "Cumbria",
        spans: &[span("CA", 1, 28), span("LA", 8, 23)],
    },
    OutcodeGroup {
        county: "West Yorkshire",
        spans: &[span("LS", 1, 29), span("BD", 1, 22), span("HD", 1, 9), span("HX", 1, 7), span("WF", 1, 17)],
    },
    OutcodeGroup {
        county: "South Yorkshire",
        spans: &[span("S", 1, 36), span("S", 60, 81), span("DN", 1, 12)],
    },
    OutcodeGroup {
        county: "North Yorkshire",
        spans: &[span("YO", 1, 62), span("HG", 1, 5), span("DL", 6, 11), span("BD", 23, 24)],
    },
    OutcodeGroup {
        county: "East Riding of Yorkshire",
        spans: &[span("HU", 1, 20), span("DN", 14, 14)],
    },
    OutcodeGroup {
        county: "County Durham",
        spans: &[span("DH", 1, 9), span("DL", 1, 5), span("DL", 12, 17), span("SR", 7, 8), span("TS", 21, 21)],
    },
    OutcodeGroup {
        county: "Cleveland",
        spans: &[span("TS", 1, 20), span("TS", 22, 27)],
    },
    OutcodeGroup {
        county: "Tyne and Wear",
        spans: &[span("NE", 1, 40), span("SR", 1, 6)],
    },
    OutcodeGroup {
        county: "Northumberland",
        spans: &[span("NE", 41, 71), span("TD", 12, 12), span("TD", 15, 15)],
    },
    OutcodeGroup {
        county: "Cardiff",
        spans: &[span("CF", 3, 5), span("CF", 10, 24)],
    },
    OutcodeGroup {
        county: "Swansea",
        spans: &[span("SA", 1, 8)],
    },
    OutcodeGroup {
        county: "Glasgow",
        spans: &[span("G", 1, 84)],
    },
    OutcodeGroup {
        county: "Edinburgh",
        spans: &[span("EH", 1, 17)],
    },
    OutcodeGroup {
        county: "Aberdeenshire",
        spans: &[span("AB", 10, 56)],
    },
];

/// Counties, unitary authorities and regions where northern teams apply.
/// Entries are stored lowercased.
pub static NORTHERN_COUNTIES: &[&str] = &[
    "lancashire",
    "greater manchester",
    "manchester",
    "merseyside",
    "liverpool",
    "cheshire",
    "cheshire east",
    "cheshire west and chester",
    "warrington",
    "halton",
    "wirral",
    "st helens",
    "sefton",
    "knowsley",
    "wigan",
    "bolton",
    "bury",
    "oldham",
    "rochdale",
    "salford",
    "stockport",
    "tameside",
    "trafford",
    "blackpool",
    "blackburn with darwen",
    "preston",
    "lancaster",
    "cumbria",
    "cumberland",
    "westmorland and furness",
    "yorkshire",
    "north yorkshire",
    "west yorkshire",
    "south yorkshire",
    "east yorkshire",
    "east riding of yorkshire",
    "york",
    "leeds",
    "bradford",
    "wakefield",
    "kirklees",
    "calderdale",
    "sheffield",
    "rotherham",
    "doncaster",
    "barnsley",
    "hull",
    "kingston upon hull",
    "north lincolnshire",
    "north east lincolnshire",
    "county durham",
    "durham",
    "darlington",
    "hartlepool",
    "cleveland",
    "teesside",
    "middlesbrough",
    "stockton-on-tees",
    "redcar and cleveland",
    "tyne and wear",
    "newcastle upon tyne",
    "gateshead",
    "sunderland",
    "north tyneside",
    "south tyneside",
    "northumberland",
    "isle of man",
    "scotland",
    "glasgow",
    "edinburgh",
    "aberdeenshire",
];
