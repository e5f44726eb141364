//! Word lists for realistic-looking names and places.

pub const FIRST_NAMES: &[&str] = &[
    "Aaliyah", "Abigail", "Adrian", "Aiden", "Alexander", "Alice", "Amelia", "Andrea", "Anthony",
    "Aria", "Benjamin", "Brandon", "Brianna", "Caleb", "Camila", "Carlos", "Caroline", "Charles",
    "Chloe", "Christopher", "Clara", "Daniel", "David", "Delilah", "Dominic", "Dylan", "Eleanor",
    "Elijah", "Elizabeth", "Ella", "Emily", "Emma", "Ethan", "Evelyn", "Ezra", "Gabriel", "Grace",
    "Hannah", "Harper", "Henry", "Isaac", "Isabella", "Jack", "Jackson", "James", "Jasmine",
    "Jayden", "Jordan", "Joseph", "Joshua", "Julia", "Kayla", "Kevin", "Layla", "Leah", "Liam",
    "Lily", "Logan", "Lucas", "Luna", "Madison", "Mason", "Mateo", "Maya", "Mia", "Michael",
    "Nathan", "Noah", "Nora", "Olivia", "Owen", "Penelope", "Riley", "Ryan", "Samuel", "Santiago",
    "Sarah", "Scarlett", "Sebastian", "Sofia", "Stella", "Thomas", "Victoria", "William", "Wyatt",
    "Zoe",
];

pub const LAST_NAMES: &[&str] = &[
    "Adams", "Allen", "Anderson", "Bailey", "Baker", "Barnes", "Bell", "Bennett", "Brooks", "Brown",
    "Butler", "Campbell", "Carter", "Clark", "Collins", "Cook", "Cooper", "Cox", "Cruz", "Davis",
    "Diaz", "Edwards", "Evans", "Fisher", "Flores", "Foster", "Garcia", "Gomez", "Gonzalez",
    "Gray", "Green", "Griffin", "Hall", "Harris", "Hayes", "Hernandez", "Hill", "Howard", "Hughes",
    "Jackson", "James", "Jenkins", "Johnson", "Jones", "Kelly", "King", "Lee", "Lewis", "Long",
    "Lopez", "Martin", "Martinez", "Miller", "Mitchell", "Moore", "Morales", "Morgan", "Morris",
    "Murphy", "Myers", "Nelson", "Nguyen", "Ortiz", "Parker", "Perez", "Perry", "Peterson",
    "Phillips", "Powell", "Price", "Ramirez", "Reed", "Reyes", "Richardson", "Rivera", "Roberts",
    "Robinson", "Rodriguez", "Rogers", "Ross", "Russell", "Sanchez", "Sanders", "Scott", "Smith",
    "Stewart", "Sullivan", "Taylor", "Thomas", "Thompson", "Torres", "Turner", "Walker", "Ward",
    "Watson", "White", "Williams", "Wilson", "Wood", "Wright", "Young",
];

pub const STATES: &[&str] = &[
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut", "Delaware",
    "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa", "Kansas", "Kentucky",
    "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan", "Minnesota", "Mississippi",
    "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire", "New Jersey", "New Mexico",
    "New York", "North Carolina", "North Dakota", "Ohio", "Oklahoma", "Oregon", "Pennsylvania",
    "Rhode Island", "South Carolina", "South Dakota", "Tennessee", "Texas", "Utah", "Vermont",
    "Virginia", "Washington", "West Virginia", "Wisconsin", "Wyoming",
];
