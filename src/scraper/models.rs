use serde::Deserialize;
use serde_json::Value;

// Jiji listing API
//  └── adverts_list
//       └── adverts[]
//            ├── title
//            ├── url            (site-relative)
//            ├── region_name
//            ├── price_obj
//            │    └── value
//            └── attrs[]
//                 ├── name      ("Property size", ...)
//                 └── value

#[derive(Debug, Deserialize)]
pub struct JijiAdvert {
    pub title: Option<String>,
    pub url: Option<String>,
    pub region_name: Option<String>,
    pub price_obj: Option<JijiPrice>,
    #[serde(default)]
    pub attrs: Vec<JijiAttr>,
}

#[derive(Debug, Deserialize)]
pub struct JijiPrice {
    pub value: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct JijiAttr {
    pub name: Option<String>,
    pub value: Option<Value>,
}

// LivingEthio pagination API
//  ├── totalPages
//  └── records[]
//       ├── id
//       ├── title
//       ├── price
//       ├── area
//       └── location
//            └── name

#[derive(Debug, Deserialize)]
pub struct LivingEthioProperty {
    pub id: Option<Value>,
    pub title: Option<String>,
    /// Absent and present-but-null are both "no price".
    pub price: Option<Value>,
    pub area: Option<Value>,
    pub location: Option<LivingEthioLocation>,
}

#[derive(Debug, Deserialize)]
pub struct LivingEthioLocation {
    pub name: Option<String>,
}
