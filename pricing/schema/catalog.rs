use super::attributes::{AttributeDomain, AttributeSpec, FormSection};

fn numeric(out: &mut Vec<AttributeSpec>, section: FormSection, name: &str, default: f32) {
    out.push(AttributeSpec {
        name: name.to_string(),
        section,
        domain: AttributeDomain::Numeric { default },
    });
}

fn categorical(
    out: &mut Vec<AttributeSpec>,
    section: FormSection,
    name: &str,
    default: &str,
    options: &[&str],
) {
    out.push(AttributeSpec {
        name: name.to_string(),
        section,
        domain: AttributeDomain::Categorical {
            default: default.to_string(),
            options: options.iter().map(ToString::to_string).collect(),
        },
    });
}

/// Specs of the built-in 68-attribute housing form, in form order: 25
/// numeric fields and 43 categorical fields with their full vocabularies.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn specs() -> Vec<AttributeSpec> {
    use FormSection::{Amenities, Areas, Basement, Lot, Structure};

    let mut specs = Vec::with_capacity(68);

    numeric(&mut specs, Lot, "MSSubClass", 20.0);
    categorical(
        &mut specs,
        Lot,
        "MSZoning",
        "RL",
        &["C (all)", "FV", "RH", "RL", "RM"],
    );
    numeric(&mut specs, Lot, "LotFrontage", 80.0);
    numeric(&mut specs, Lot, "LotArea", 9600.0);
    categorical(&mut specs, Lot, "Street", "Pave", &["Grvl", "Pave"]);
    categorical(&mut specs, Lot, "Alley", "NA", &["Grvl", "NA", "Pave"]);
    categorical(&mut specs, Lot, "LotShape", "Reg", &["IR1", "IR2", "IR3", "Reg"]);
    categorical(
        &mut specs,
        Lot,
        "LandContour",
        "Lvl",
        &["Bnk", "HLS", "Low", "Lvl"],
    );
    categorical(&mut specs, Lot, "Utilities", "AllPub", &["AllPub", "NoSeWa"]);
    categorical(
        &mut specs,
        Lot,
        "LotConfig",
        "FR2",
        &["Corner", "CulDSac", "FR2", "FR3", "Inside"],
    );
    categorical(&mut specs, Lot, "LandSlope", "Gtl", &["Gtl", "Mod", "Sev"]);
    categorical(
        &mut specs,
        Lot,
        "Neighborhood",
        "CollgCr",
        &[
            "Blmngtn", "Blueste", "BrDale", "BrkSide", "ClearCr", "CollgCr", "Crawfor",
            "Edwards", "Gilbert", "IDOTRR", "MeadowV", "Mitchel", "NAmes", "NPkVill",
            "NWAmes", "NoRidge", "NridgHt", "OldTown", "SWISU", "Sawyer", "SawyerW",
            "Somerst", "StoneBr", "Timber", "Veenker",
        ],
    );
    categorical(
        &mut specs,
        Lot,
        "Condition1",
        "Norm",
        &[
            "Artery", "Feedr", "Norm", "PosA", "PosN", "RRAe", "RRAn", "RRNe", "RRNn",
        ],
    );
    categorical(
        &mut specs,
        Lot,
        "Condition2",
        "Norm",
        &[
            "Artery", "Feedr", "Norm", "PosA", "PosN", "RRAe", "RRAn", "RRNe", "RRNn",
        ],
    );

    categorical(
        &mut specs,
        Structure,
        "BldgType",
        "1Fam",
        &["1Fam", "2fmCon", "Duplex", "Twnhs", "TwnhsE"],
    );
    categorical(
        &mut specs,
        Structure,
        "HouseStyle",
        "2Story",
        &[
            "1.5Fin", "1.5Unf", "1Story", "2.5Fin", "2.5Unf", "2Story", "SFoyer", "SLvl",
        ],
    );
    numeric(&mut specs, Structure, "OverallQual", 7.0);
    numeric(&mut specs, Structure, "OverallCond", 5.0);
    numeric(&mut specs, Structure, "YearBuilt", 2000.0);
    numeric(&mut specs, Structure, "YearRemodAdd", 2005.0);
    categorical(
        &mut specs,
        Structure,
        "RoofStyle",
        "Gable",
        &["Flat", "Gable", "Gambrel", "Hip", "Mansard", "Shed"],
    );
    categorical(
        &mut specs,
        Structure,
        "RoofMatl",
        "CompShg",
        &[
            "ClyTile", "CompShg", "Membran", "Metal", "Roll", "Tar&Grv", "WdShake", "WdShngl",
        ],
    );
    categorical(
        &mut specs,
        Structure,
        "Exterior1st",
        "VinylSd",
        &[
            "AsbShng", "AsphShn", "BrkComm", "BrkFace", "CBlock", "CemntBd", "HdBoard",
            "ImStucc", "MetalSd", "Plywood", "Stone", "Stucco", "VinylSd", "Wd Sdng",
            "WdShing",
        ],
    );
    categorical(
        &mut specs,
        Structure,
        "Exterior2nd",
        "VinylSd",
        &[
            "AsbShng", "AsphShn", "Brk Cmn", "BrkFace", "CBlock", "CmentBd", "HdBoard",
            "ImStucc", "MetalSd", "Other", "Plywood", "Stone", "Stucco", "VinylSd",
            "Wd Sdng", "Wd Shng",
        ],
    );
    categorical(
        &mut specs,
        Structure,
        "MasVnrType",
        "None",
        &["BrkCmn", "BrkFace", "None", "Stone"],
    );
    numeric(&mut specs, Structure, "MasVnrArea", 0.0);
    categorical(&mut specs, Structure, "ExterQual", "Gd", &["Ex", "Fa", "Gd", "TA"]);
    categorical(
        &mut specs,
        Structure,
        "ExterCond",
        "TA",
        &["Ex", "Fa", "Gd", "Po", "TA"],
    );
    categorical(
        &mut specs,
        Structure,
        "Foundation",
        "PConc",
        &["BrkTil", "CBlock", "PConc", "Slab", "Stone", "Wood"],
    );

    categorical(
        &mut specs,
        Basement,
        "BsmtQual",
        "Gd",
        &["Ex", "Fa", "Gd", "NA", "TA"],
    );
    categorical(
        &mut specs,
        Basement,
        "BsmtCond",
        "TA",
        &["Fa", "Gd", "NA", "Po", "TA"],
    );
    categorical(
        &mut specs,
        Basement,
        "BsmtExposure",
        "No",
        &["Av", "Gd", "Mn", "NA", "No"],
    );
    categorical(
        &mut specs,
        Basement,
        "BsmtFinType1",
        "GLQ",
        &["ALQ", "BLQ", "GLQ", "LwQ", "NA", "Rec", "Unf"],
    );
    numeric(&mut specs, Basement, "BsmtFinSF1", 0.0);
    categorical(
        &mut specs,
        Basement,
        "BsmtFinType2",
        "Unf",
        &["ALQ", "BLQ", "GLQ", "LwQ", "NA", "Rec", "Unf"],
    );
    numeric(&mut specs, Basement, "BsmtFinSF2", 0.0);
    numeric(&mut specs, Basement, "BsmtUnfSF", 0.0);
    numeric(&mut specs, Basement, "TotalBsmtSF", 0.0);

    numeric(&mut specs, Areas, "1stFlrSF", 900.0);
    numeric(&mut specs, Areas, "2ndFlrSF", 500.0);
    numeric(&mut specs, Areas, "GrLivArea", 1400.0);
    numeric(&mut specs, Areas, "GarageCars", 2.0);
    numeric(&mut specs, Areas, "GarageArea", 400.0);
    numeric(&mut specs, Areas, "WoodDeckSF", 0.0);
    numeric(&mut specs, Areas, "OpenPorchSF", 0.0);
    numeric(&mut specs, Areas, "EnclosedPorch", 0.0);
    numeric(&mut specs, Areas, "ScreenPorch", 0.0);
    numeric(&mut specs, Areas, "PoolArea", 0.0);
    numeric(&mut specs, Areas, "MiscVal", 0.0);
    numeric(&mut specs, Areas, "MoSold", 6.0);
    numeric(&mut specs, Areas, "YrSold", 2020.0);

    categorical(
        &mut specs,
        Amenities,
        "Heating",
        "GasA",
        &["Floor", "GasA", "GasW", "Grav", "OthW", "Wall"],
    );
    categorical(
        &mut specs,
        Amenities,
        "HeatingQC",
        "Ex",
        &["Ex", "Fa", "Gd", "Po", "TA"],
    );
    categorical(&mut specs, Amenities, "CentralAir", "Y", &["N", "Y"]);
    categorical(
        &mut specs,
        Amenities,
        "Electrical",
        "SBrkr",
        &["FuseA", "FuseF", "FuseP", "Mix", "SBrkr"],
    );
    categorical(
        &mut specs,
        Amenities,
        "KitchenQual",
        "Gd",
        &["Ex", "Fa", "Gd", "TA"],
    );
    categorical(
        &mut specs,
        Amenities,
        "Functional",
        "Typ",
        &["Maj1", "Maj2", "Min1", "Min2", "Mod", "Sev", "Typ"],
    );
    categorical(
        &mut specs,
        Amenities,
        "FireplaceQu",
        "NA",
        &["Ex", "Fa", "Gd", "NA", "Po", "TA"],
    );
    categorical(
        &mut specs,
        Amenities,
        "GarageType",
        "Attchd",
        &[
            "2Types", "Attchd", "Basment", "BuiltIn", "CarPort", "Detchd", "NA",
        ],
    );
    categorical(
        &mut specs,
        Amenities,
        "GarageFinish",
        "Unf",
        &["Fin", "NA", "RFn", "Unf"],
    );
    categorical(
        &mut specs,
        Amenities,
        "GarageQual",
        "TA",
        &["Ex", "Fa", "Gd", "NA", "Po", "TA"],
    );
    categorical(
        &mut specs,
        Amenities,
        "GarageCond",
        "TA",
        &["Ex", "Fa", "Gd", "NA", "Po", "TA"],
    );
    categorical(&mut specs, Amenities, "PavedDrive", "Y", &["N", "P", "Y"]);
    categorical(&mut specs, Amenities, "PoolQC", "NA", &["Ex", "Fa", "Gd", "NA"]);
    categorical(
        &mut specs,
        Amenities,
        "Fence",
        "NA",
        &["GdPrv", "GdWo", "MnPrv", "MnWw", "NA"],
    );
    categorical(
        &mut specs,
        Amenities,
        "MiscFeature",
        "NA",
        &["Gar2", "NA", "Othr", "Shed", "TenC"],
    );
    categorical(
        &mut specs,
        Amenities,
        "SaleType",
        "WD",
        &[
            "COD", "CWD", "Con", "ConLD", "ConLI", "ConLw", "New", "Oth", "WD",
        ],
    );
    categorical(
        &mut specs,
        Amenities,
        "SaleCondition",
        "Normal",
        &["Abnorml", "AdjLand", "Alloca", "Family", "Normal", "Partial"],
    );

    specs
}

#[cfg(test)]
mod tests {
    use super::super::attributes::{AttributeSchema, AttributeValue, FormSection};
    use super::*;

    #[test]
    fn catalog_passes_schema_validation() {
        let schema = AttributeSchema::from_specs(specs()).unwrap();
        assert_eq!(schema.len(), 68);
    }

    #[test]
    fn catalog_counts_by_kind() {
        let all = specs();
        let numeric = all.iter().filter(|s| s.domain.is_numeric()).count();
        assert_eq!(numeric, 25);
        assert_eq!(all.len() - numeric, 43);
    }

    #[test]
    fn every_section_is_populated() {
        let schema = AttributeSchema::builtin();
        for section in FormSection::ALL {
            assert!(
                !schema.section(section).is_empty(),
                "section {section:?} has no attributes"
            );
        }
        assert_eq!(schema.section(FormSection::Basement).len(), 9);
        assert_eq!(schema.section(FormSection::Areas).len(), 13);
    }

    #[test]
    fn defaults_match_the_standard_form() {
        let schema = AttributeSchema::builtin();
        let lot_area = schema.get("LotArea").unwrap();
        assert_eq!(lot_area.domain.default_value(), AttributeValue::from(9600.0));
        let neighborhood = schema.get("Neighborhood").unwrap();
        assert_eq!(
            neighborhood.domain.default_value(),
            AttributeValue::from("CollgCr")
        );
        let month = schema.get("MoSold").unwrap();
        assert_eq!(month.domain.default_value(), AttributeValue::from(6.0));
    }
}
