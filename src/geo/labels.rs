//! Country name labels, positioned at approximate geographic centers.

/// A label anchored to a geographic point.
pub struct CountryLabel {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const fn label(name: &'static str, lat: f64, lon: f64) -> CountryLabel {
    CountryLabel { name, lat, lon }
}

/// Manually positioned labels for countries in the covered region.
pub const COUNTRY_LABELS: &[CountryLabel] = &[
    // Turkey and Central Asia
    label("Türkiye", 39.0, 35.0),
    label("Uzbekistan", 41.0, 64.0),
    label("Kazakhstan", 48.0, 66.0),
    label("Turkmenistan", 38.0, 59.0),
    label("Kyrgyzstan", 41.0, 74.0),
    label("Tajikistan", 38.5, 71.0),
    label("Afghanistan", 33.0, 66.0),
    // Middle East
    label("Iran", 32.0, 53.0),
    label("Iraq", 33.0, 44.0),
    label("Syria", 35.0, 38.0),
    label("Lebanon", 33.8, 35.8),
    label("Israel", 31.5, 34.8),
    label("Palestine", 31.9, 35.2),
    label("Jordan", 31.2, 36.8),
    label("Saudi Arabia", 23.9, 45.0),
    label("Yemen", 15.5, 44.2),
    label("Oman", 21.5, 55.9),
    label("United Arab Emirates", 23.4, 53.8),
    label("Qatar", 25.3, 51.2),
    label("Bahrain", 26.0, 50.6),
    label("Kuwait", 29.3, 47.5),
    label("Cyprus", 35.1, 33.2),
    // North Africa
    label("Egypt", 26.8, 30.8),
    label("Libya", 27.0, 17.0),
    label("Tunisia", 34.0, 9.0),
    label("Algeria", 28.0, 2.0),
    label("Morocco", 32.0, -5.0),
    label("Sudan", 15.5, 30.0),
    label("Ethiopia", 9.0, 38.7),
    label("Eritrea", 15.2, 39.8),
    label("Djibouti", 11.8, 42.6),
    label("Somalia", 5.2, 46.2),
    label("Chad", 15.5, 19.0),
    label("Niger", 17.6, 8.1),
    label("Mali", 17.6, -4.0),
    label("Mauritania", 20.1, -10.9),
    // Europe - Western
    label("Spain", 40.4, -3.7),
    label("Portugal", 39.5, -8.0),
    label("France", 46.2, 2.2),
    label("Italy", 41.9, 12.6),
    label("Greece", 39.1, 22.0),
    label("Malta", 35.9, 14.4),
    // Europe - Central
    label("Germany", 51.2, 10.5),
    label("Austria", 47.5, 14.6),
    label("Switzerland", 46.8, 8.2),
    label("Czech Republic", 49.8, 15.5),
    label("Slovakia", 48.7, 19.7),
    label("Hungary", 47.5, 19.1),
    label("Poland", 52.1, 19.4),
    label("Slovenia", 46.1, 14.8),
    label("Croatia", 45.1, 15.2),
    label("Bosnia and Herzegovina", 44.0, 17.8),
    label("Serbia", 44.0, 21.0),
    label("Montenegro", 42.7, 19.2),
    label("North Macedonia", 41.6, 21.7),
    label("Albania", 41.2, 20.2),
    label("Kosovo", 42.6, 21.0),
    label("Bulgaria", 42.7, 25.2),
    label("Romania", 46.0, 25.0),
    label("Moldova", 47.0, 28.9),
    // Europe - Northern
    label("United Kingdom", 54.7, -2.5),
    label("Ireland", 53.4, -8.2),
    label("Netherlands", 52.1, 5.3),
    label("Belgium", 50.5, 4.5),
    label("Luxembourg", 49.8, 6.1),
    label("Denmark", 56.3, 9.5),
    label("Sweden", 60.1, 18.6),
    label("Norway", 60.5, 8.5),
    label("Finland", 61.9, 25.7),
    label("Iceland", 64.8, -18.0),
    label("Estonia", 58.7, 25.0),
    label("Latvia", 56.9, 24.6),
    label("Lithuania", 55.2, 23.9),
    // Europe - Eastern
    label("Ukraine", 48.4, 31.2),
    label("Belarus", 53.7, 27.9),
    label("Russia", 61.5, 105.3),
    label("Georgia", 42.3, 43.4),
    label("Armenia", 40.1, 44.5),
    label("Azerbaijan", 40.1, 47.6),
    // Other
    label("China", 35.9, 104.2),
    label("India", 20.6, 78.9),
    label("Pakistan", 30.4, 69.3),
];
