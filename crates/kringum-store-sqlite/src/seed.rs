//! Reference data written into an empty database at first startup.

/// One row of the reference port list.
pub struct PortSeed {
  pub name:        &'static str,
  pub country:     &'static str,
  pub gps:         &'static str,
  pub description: &'static str,
  pub tag:         &'static str,
}

const fn port(
  name: &'static str,
  country: &'static str,
  gps: &'static str,
  description: &'static str,
  tag: &'static str,
) -> PortSeed {
  PortSeed { name, country, gps, description, tag }
}

/// Cruise Europe member ports around the North Atlantic.
pub const PORTS: &[PortSeed] = &[
  port("Reykjavik", "Iceland", "64.1522,-21.9506", "Capital of Iceland; Skarfabakki and Old Harbour terminals.", "Iceland"),
  port("Akureyri", "Iceland", "65.6835,-18.0878", "Capital of the North at the head of Eyjafjörður.", "Iceland"),
  port("Ísafjörður", "Iceland", "66.0750,-23.1240", "Largest town of the Westfjords.", "Iceland"),
  port("Seyðisfjörður", "Iceland", "65.2600,-14.0100", "East fjords village and Norröna ferry port.", "Iceland"),
  port("Grundarfjörður", "Iceland", "64.9240,-23.2600", "Snæfellsnes peninsula, beneath Kirkjufell.", "Iceland"),
  port("Djúpivogur", "Iceland", "64.6560,-14.2840", "Small fishing village in the southeast.", "Iceland"),
  port("Heimaey", "Iceland", "63.4420,-20.2700", "Westman Islands, shaped by the 1973 eruption.", "Iceland"),
  port("Húsavík", "Iceland", "66.0449,-17.3389", "Whale-watching capital on Skjálfandi bay.", "Iceland"),
  port("Siglufjörður", "Iceland", "66.1520,-18.9080", "Former herring boom town on the Troll peninsula.", "Iceland"),
  port("Tórshavn", "Faroe Islands", "62.0107,-6.7741", "Capital of the Faroe Islands.", "Faroe Islands"),
  port("Bergen", "Norway", "60.3913,5.3221", "Gateway to the fjords; Bryggen wharf.", "Norway"),
  port("Geiranger", "Norway", "62.1008,7.2059", "Anchorage in the Geirangerfjord.", "Norway"),
  port("Ålesund", "Norway", "62.4722,6.1495", "Art Nouveau town on the Sunnmøre coast.", "Norway"),
  port("Tromsø", "Norway", "69.6492,18.9553", "Arctic city north of the polar circle.", "Norway"),
  port("Honningsvåg", "Norway", "70.9821,25.9704", "Nearest port to the North Cape.", "Norway"),
  port("Longyearbyen", "Svalbard", "78.2232,15.6267", "Main settlement of Svalbard.", "Arctic"),
  port("Nuuk", "Greenland", "64.1814,-51.6941", "Capital of Greenland.", "Greenland"),
  port("Qaqortoq", "Greenland", "60.7184,-46.0356", "Largest town in South Greenland.", "Greenland"),
  port("Lerwick", "United Kingdom", "60.1550,-1.1450", "Capital of Shetland.", "British Isles"),
  port("Kirkwall", "United Kingdom", "58.9810,-2.9600", "Capital of Orkney; St Magnus Cathedral.", "British Isles"),
  port("Invergordon", "United Kingdom", "57.6890,-4.1680", "Cromarty Firth; gateway to the Highlands.", "British Isles"),
  port("Dublin", "Ireland", "53.3498,-6.2603", "Capital of Ireland on the River Liffey.", "British Isles"),
  port("Copenhagen", "Denmark", "55.6761,12.5683", "Capital of Denmark; Langelinie and Ocean Quay.", "Baltic"),
  port("Amsterdam", "Netherlands", "52.3676,4.9041", "Passenger Terminal Amsterdam on the IJ.", "North Sea"),
];

/// The sample item written when the `items` table is empty.
pub struct ItemSeed {
  pub name:  &'static str,
  pub story: &'static str,
  pub tag:   &'static str,
  pub gps:   &'static str,
}

pub const EXAMPLE_ITEM: ItemSeed = ItemSeed {
  name:  "Skálholt",
  story: "Skálholt is one of Iceland's most important historical sites, \
located in the southern lowlands near the river Hvítá. For over 700 years, \
from 1056 until 1785, it served as the seat of one of Iceland's two \
bishoprics and was the country's undisputed centre of learning, culture, and \
political power. At its peak, Skálholt was the largest settlement in Iceland \
with a cathedral, a school, and dozens of buildings bustling with clergy and \
students.\n\nToday, Skálholt is home to a modern cathedral built in 1963, an \
excavated medieval tunnel, and a small museum that chronicles the site's rich \
past. The grounds host summer concerts and cultural events that draw visitors \
from across the country. Surrounded by the gentle hills and fertile farmland \
of southern Iceland, Skálholt remains a place of quiet reflection, connecting \
modern Icelanders to the deep roots of their heritage.",
  tag:   "Culture",
  gps:   "64.1272,-20.5269",
};
