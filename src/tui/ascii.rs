// ascii art for the header

pub const NLSITE_LOGO: [&str; 5] = [
    "       _     _ _       ",
    " _ __ | |___(_) |_ ___ ",
    "| '_ \\| / __| | __/ _ \\",
    "| | | | \\__ \\ | ||  __/",
    "|_| |_|_|___/_|\\__\\___|",
];
